/// Character classes of a block name part (`[a-z][a-z0-9-]*`).
pub struct BlockNamePart;

impl BlockNamePart {
    /// Separates the namespace from the name.
    pub const SEPARATOR: u8 = b'/';
    /// Namespace reported for names written without a prefix.
    pub const DEFAULT_NAMESPACE: &'static str = "core";

    pub fn is_start(b: u8) -> bool {
        b.is_ascii_lowercase()
    }

    pub fn is_continue(b: u8) -> bool {
        b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'
    }

    /// Checks a whole part, e.g. a namespace read back from a wire buffer.
    pub fn is_valid(part: &str) -> bool {
        let mut bytes = part.bytes();
        bytes.next().is_some_and(Self::is_start) && bytes.all(Self::is_continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_parts() {
        assert!(BlockNamePart::is_valid("a"));
        assert!(BlockNamePart::is_valid("core"));
        assert!(BlockNamePart::is_valid("a0b1-c"));
    }

    #[test]
    fn invalid_parts() {
        assert!(!BlockNamePart::is_valid(""));
        assert!(!BlockNamePart::is_valid("0abc"));
        assert!(!BlockNamePart::is_valid("-abc"));
        assert!(!BlockNamePart::is_valid("Foo"));
        assert!(!BlockNamePart::is_valid("foo_bar"));
    }
}
