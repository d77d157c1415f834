/// A document that cannot be represented in the wire layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("block name `{name}` is {len} bytes, the wire format allows {max}", max = u8::MAX)]
    NameTooLong { name: String, len: usize },

    #[error("block `{name}` has {count} children, the wire format allows {max}", max = u8::MAX)]
    TooManyChildren { name: String, count: usize },

    #[error("{what} of {value} does not fit in 32 bits")]
    Overflow { what: &'static str, value: usize },
}

/// A buffer that does not match the wire layout.
///
/// Decoding never yields a partial tree: any of these aborts the whole call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("buffer truncated: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("buffer declares {declared} bytes but holds {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("unknown node tag {tag} at offset {offset}")]
    UnknownTag { offset: usize, tag: u8 },

    #[error("invalid block name at offset {offset}")]
    InvalidName { offset: usize },

    #[error("span {start}..{end} at offset {offset} is not a valid range of the {input_len}-byte input")]
    SpanOutOfBounds {
        offset: usize,
        start: usize,
        end: usize,
        input_len: usize,
    },

    #[error("empty phrase at offset {offset}")]
    EmptyPhrase { offset: usize },

    #[error("{count} trailing bytes after the last node at offset {offset}")]
    TrailingBytes { offset: usize, count: usize },

    #[error("nodes nest deeper than {max_depth} at offset {offset}")]
    DepthExceeded { offset: usize, max_depth: usize },
}
