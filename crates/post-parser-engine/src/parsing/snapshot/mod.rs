//! # Snapshot Testing Support
//!
//! Utilities for looking at parser output in tests and from the CLI.
//!
//! ## Modules
//!
//! - **`outline`**: renders a document as an indented text outline, stable
//!   enough for `insta` snapshots
//! - **`invariants`**: runtime checks for parser correctness (spans in
//!   bounds, phrases non-empty and maximal, document order preserved)

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::{outline, preview};
