/// Comment delimiters of block markers.
pub struct Marker;

impl Marker {
    /// Every marker starts as an HTML comment.
    pub const OPEN: &'static str = "<!--";
    /// Ends an opener of a balanced block, or a closer.
    pub const CLOSE: &'static [u8; 3] = b"-->";
    /// Ends a void (self-closing) block.
    pub const VOID_CLOSE: &'static [u8; 4] = b"/-->";
    /// Follows `<!--` in an opener.
    pub const OPENER: &'static [u8; 3] = b"wp:";
    /// Follows `<!--` in a closer.
    pub const CLOSER: &'static [u8; 4] = b"/wp:";
}

/// Whitespace accepted between the parts of a marker.
pub struct Whitespace;

impl Whitespace {
    pub fn contains(b: u8) -> bool {
        matches!(b, b' ' | b'\n' | b'\r' | b'\t')
    }
}
