//! # Marker Kinds
//!
//! Types that own the delimiters of the block micro-syntax. Grammar rules
//! refer to these constants and never spell out `<!--` or `wp:` themselves.
//!
//! - **`Marker`**: comment delimiters and the opener/closer prefixes
//! - **`BlockNamePart`**: the `[a-z][a-z0-9-]*` character classes and the
//!   namespace separator
//! - **`Whitespace`**: the whitespace allowed inside markers

pub mod block_name;
pub mod marker;

pub use block_name::BlockNamePart;
pub use marker::{Marker, Whitespace};
