use core::fmt;

/// A structured error code identifying why a bencode item was rejected.
///
/// The first six codes are grammar violations. The remaining codes are only produced by
/// configured [`DecodeLimits`](crate::DecodeLimits) or by canonical validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A byte that cannot start a value, or trailing bytes after the single top-level value.
    UnexpectedByte,
    /// Malformed integer: negative zero, leading zero, non-digit, overflow, or missing `e`.
    BadInteger,
    /// Malformed byte string: leading zero in the length, missing `:`, or truncated payload.
    BadString,
    /// List not closed by `e` before the end of input.
    BadList,
    /// Dict key is not a byte string, or input ended where a key was expected.
    BadDictKey,
    /// Input ended where a dict value was expected.
    BadDictValue,

    /// Nesting depth limit exceeded.
    DepthLimitExceeded,
    /// Input is longer than the configured limit.
    InputLenLimitExceeded,
    /// Declared byte-string length exceeds the configured limit.
    BytesLenLimitExceeded,
    /// Dict keys are not strictly ascending (canonical validation only).
    NonCanonicalDictOrder,
}

impl ErrorCode {
    const fn message(self) -> &'static str {
        match self {
            Self::UnexpectedByte => "unexpected byte",
            Self::BadInteger => "malformed integer",
            Self::BadString => "malformed byte string",
            Self::BadList => "unterminated list",
            Self::BadDictKey => "bad dict key",
            Self::BadDictValue => "bad dict value",

            Self::DepthLimitExceeded => "nesting depth limit exceeded",
            Self::InputLenLimitExceeded => "input length exceeds decode limits",
            Self::BytesLenLimitExceeded => "byte string length exceeds decode limits",
            Self::NonCanonicalDictOrder => "dict keys not in canonical order",
        }
    }
}

/// A bencode decode error with a stable code, the offending byte, and its byte offset.
///
/// When the failure is "input ended before an expected byte", `byte` is `0` and `offset` equals
/// the input length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeError {
    /// The error code.
    pub code: ErrorCode,
    /// The offending byte, or `0` when input was exhausted.
    pub byte: u8,
    /// Zero-based offset of the offending byte from the start of input.
    pub offset: usize,
}

impl DecodeError {
    /// Construct an error for `byte` found at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, byte: u8, offset: usize) -> Self {
        Self { code, byte, offset }
    }

    /// Construct an error for input that ended at `offset`.
    #[inline]
    #[must_use]
    pub const fn eof(code: ErrorCode, offset: usize) -> Self {
        Self {
            code,
            byte: 0,
            offset,
        }
    }

    /// Returns `true` iff this error was raised by a configured limit rather than the grammar.
    #[inline]
    #[must_use]
    pub const fn is_limit(self) -> bool {
        matches!(
            self.code,
            ErrorCode::DepthLimitExceeded
                | ErrorCode::InputLenLimitExceeded
                | ErrorCode::BytesLenLimitExceeded
        )
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.code.message();
        match self.code {
            ErrorCode::BadDictValue
            | ErrorCode::DepthLimitExceeded
            | ErrorCode::InputLenLimitExceeded
            | ErrorCode::BytesLenLimitExceeded => {
                write!(f, "bencode decode failed at {}: {msg}", self.offset)
            }
            _ if self.byte.is_ascii_graphic() => write!(
                f,
                "bencode decode failed at {}: {msg} ('{}')",
                self.offset,
                char::from(self.byte)
            ),
            _ => write!(
                f,
                "bencode decode failed at {}: {msg} (0x{:02x})",
                self.offset, self.byte
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// A misuse of the streaming [`Encoder`](crate::Encoder) that would produce invalid bencode.
///
/// Nothing from the rejected container or entry is left in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EncodeError {
    /// A [`DictEncoder::entry`](crate::DictEncoder::entry) closure wrote `written` values instead
    /// of exactly one.
    EntryValueCount {
        /// Number of top-level values the closure wrote.
        written: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntryValueCount { written } => write!(
                f,
                "bencode encode failed: dict entry must hold exactly one value, got {written}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}
