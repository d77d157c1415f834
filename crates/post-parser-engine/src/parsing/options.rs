use serde::{Deserialize, Serialize};

/// How far block nesting may go before the parse is aborted.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How the extent of a block's attribute object is found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum AttributeScan {
    /// The object ends at the first `}` followed by optional whitespace and
    /// `-->` or `/-->`. Matches how existing content has always been read.
    #[default]
    Lookahead,
    /// The object ends at the `}` matching the opening `{`, skipping braces
    /// inside JSON strings. That `}` must still be followed by a marker end.
    Balanced,
}

/// Knobs of the grammar engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest block nesting accepted; top-level blocks are at depth 1.
    pub max_depth: usize,
    pub attribute_scan: AttributeScan,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            attribute_scan: AttributeScan::default(),
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_attribute_scan(mut self, attribute_scan: AttributeScan) -> Self {
        self.attribute_scan = attribute_scan;
        self
    }
}
