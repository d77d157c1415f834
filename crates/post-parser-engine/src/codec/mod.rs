//! # Tree Codec
//!
//! A flat little-endian encoding of a [`Document`] for handing a parsed post
//! to another runtime without parsing it again there.
//!
//! ```text
//! buffer      := total_length:u32 , node_count:u32 , node*
//! node        := tag:u8 ( block_body | phrase_body )
//! block_body  := name_len:u8 , name:bytes[name_len] ,
//!                attrs_offset:u32 , attrs_len:u32 ,
//!                child_count:u8 , node*
//! phrase_body := content_offset:u32 , content_len:u32
//! ```
//!
//! - `total_length` counts the whole buffer, header included.
//! - `node_count` counts top-level nodes only; children follow their block.
//! - `name` is the block name exactly as written (`ns/name` or `name`).
//! - Offsets point into the **original input**, not into the buffer. Phrase
//!   and attribute text is never copied, so the decoding side must keep the
//!   input alive as long as the decoded tree.
//! - Absent attributes are `attrs_offset = 0, attrs_len = 0`.
//!
//! [`Document`]: crate::parsing::Document

mod decoder;
mod encoder;
mod error;
mod reader;

pub use decoder::Decoder;
pub use encoder::encode;
pub use error::{DecodeError, EncodeError};

use crate::parsing::Document;

/// Tag byte of a block node.
pub const TAG_BLOCK: u8 = 1;
/// Tag byte of a phrase node.
pub const TAG_PHRASE: u8 = 2;
/// Size of `total_length` plus `node_count`.
pub const HEADER_LEN: usize = 8;

/// Decodes `buffer` against the `input` it was encoded from.
pub fn decode<'a>(buffer: &'a [u8], input: &'a str) -> Result<Document<'a>, DecodeError> {
    Decoder::new(input).decode(buffer)
}
