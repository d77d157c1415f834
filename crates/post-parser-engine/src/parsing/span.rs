/// A byte range `[start, end)` into the parsed input.
///
/// Phrases and attributes store spans next to their text so the codec can
/// ship offsets instead of copies, and so a decoded tree can be checked
/// against the input it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Slices `source` with this span, or `None` when the span is out of
    /// bounds or does not fall on character boundaries.
    pub fn slice(self, source: &str) -> Option<&str> {
        if self.start > self.end {
            return None;
        }
        source.get(self.start..self.end)
    }
}
