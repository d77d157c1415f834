/// Errors from the grammar engine.
///
/// Unrecognised text is never an error: it becomes phrase content. The only
/// failure is nesting deeper than [`ParseOptions::max_depth`].
///
/// [`ParseOptions::max_depth`]: super::ParseOptions::max_depth
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("block nesting exceeds the maximum depth of {max_depth} (opener at byte {offset})")]
    DepthExceeded { max_depth: usize, offset: usize },
}
