//! # Grammar Engine
//!
//! Turns post text into a [`Document`]: blocks delimited by
//! `<!-- wp:name {attrs} -->` / `<!-- /wp:name -->` (or the void form
//! `<!-- wp:name /-->`) and the phrases between them.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter constants of the marker syntax
//! - **`cursor`**: `Cursor` for byte-by-byte evaluation with position tracking
//! - **`grammar`**: the recursive-descent rules
//! - **`span`**: byte ranges into the input
//! - **`snapshot`**: outline rendering and invariant checks for tests
//!
//! ## Permissiveness
//!
//! Parsing never rejects text. A marker that does not form a block is phrase
//! content, and so is everything else outside blocks. The only error is
//! nesting past [`ParseOptions::max_depth`] by an opener whose closer appears
//! later in the text.

pub mod kinds;
pub mod snapshot;
pub mod span;

pub(crate) mod cursor;

mod error;
mod grammar;
mod node;
mod options;

#[cfg(test)]
mod tests;

pub use error::ParseError;
pub use node::{Attributes, Block, BlockName, Descendants, Document, Node, Phrase};
pub use options::{AttributeScan, DEFAULT_MAX_DEPTH, ParseOptions};

use grammar::Grammar;

/// Parses `input` with default [`ParseOptions`].
pub fn parse(input: &str) -> Result<Document<'_>, ParseError> {
    parse_with(input, &ParseOptions::default())
}

/// Parses `input` into a document whose nodes borrow from it.
pub fn parse_with<'a>(input: &'a str, options: &ParseOptions) -> Result<Document<'a>, ParseError> {
    let document = Grammar::new(options, input).document()?;
    log::debug!(
        "parsed {} bytes into {} top-level nodes",
        input.len(),
        document.len()
    );
    Ok(document)
}
