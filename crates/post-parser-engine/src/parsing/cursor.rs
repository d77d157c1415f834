use super::kinds::Whitespace;

/// A cursor for byte-by-byte grammar evaluation with position tracking.
///
/// Every grammar rule takes `&mut Cursor`, and a rule that fails restores
/// the cursor it was given (rules `clone()` the cursor before trying and
/// write the clone back on failure).
#[derive(Clone)]
pub(crate) struct Cursor<'a> {
    /// The whole input being parsed.
    pub(crate) s: &'a str,
    /// Current byte index into `s`.
    pub(crate) i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub(crate) fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub(crate) fn pos(&self) -> usize {
        self.i
    }

    /// Peeks at the current byte without advancing.
    pub(crate) fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub(crate) fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub(crate) fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub(crate) fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes `pat` if the remaining input starts with it.
    pub(crate) fn eat(&mut self, pat: &[u8]) -> bool {
        if self.starts_with(pat) {
            self.bump_n(pat.len());
            true
        } else {
            false
        }
    }

    /// Consumes bytes while `pred` holds and returns how many were consumed.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        self.i - start
    }

    /// Consumes marker whitespace and returns how many bytes were consumed.
    pub(crate) fn eat_whitespace(&mut self) -> usize {
        self.eat_while(Whitespace::contains)
    }

    /// Returns the distance from the current position to the next occurrence
    /// of `pat`, without moving.
    pub(crate) fn find(&self, pat: &str) -> Option<usize> {
        self.s.get(self.i..)?.find(pat)
    }

    /// Moves to the end of input.
    pub(crate) fn bump_to_end(&mut self) {
        self.i = self.s.len();
    }

    /// Returns the input between `start` and the current position.
    ///
    /// Rules only call this with `start` on an ASCII delimiter, so both ends
    /// are character boundaries.
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.s[start..self.i]
    }
}
