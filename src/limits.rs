/// Default maximum nesting depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Decode-time resource limits.
///
/// Limits are checked deterministically while parsing; the first violation aborts the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum total input length in bytes.
    pub max_input_bytes: usize,
    /// Maximum nesting depth of lists and dicts. A top-level list has depth 1.
    pub max_depth: usize,
    /// Maximum declared byte-string length (applies to dict keys too).
    pub max_bytes_len: usize,
}

impl DecodeLimits {
    /// Construct conservative limits derived from a maximum message size.
    ///
    /// The defaults are:
    /// - `max_input_bytes = max_message_bytes`
    /// - `max_bytes_len = max_message_bytes`
    /// - `max_depth = DEFAULT_MAX_DEPTH`
    #[must_use]
    pub const fn for_bytes(max_message_bytes: usize) -> Self {
        Self {
            max_input_bytes: max_message_bytes,
            max_depth: DEFAULT_MAX_DEPTH,
            max_bytes_len: max_message_bytes,
        }
    }

    /// Unbounded sizes with the given depth limit.
    #[must_use]
    pub const fn with_depth(max_depth: usize) -> Self {
        Self {
            max_input_bytes: usize::MAX,
            max_depth,
            max_bytes_len: usize::MAX,
        }
    }
}

impl Default for DecodeLimits {
    /// Sizes are bounded only by the input itself; depth is capped at [`DEFAULT_MAX_DEPTH`].
    fn default() -> Self {
        Self::with_depth(DEFAULT_MAX_DEPTH)
    }
}
