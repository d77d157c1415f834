pub mod codec;
pub mod parsing;

// Re-export key types for easier usage
pub use codec::{DecodeError, Decoder, EncodeError, decode, encode};
pub use parsing::{
    AttributeScan, Attributes, Block, BlockName, Document, Node, ParseError, ParseOptions, Phrase,
    parse, parse_with,
};
