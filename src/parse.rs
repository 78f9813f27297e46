use alloc::vec::Vec;

use crate::canonical::CanonicalBytesRef;
use crate::value::{Dict, Value};
use crate::wire::{digit_value, DICT_BEGIN, END, INT_BEGIN, LIST_BEGIN, MINUS, SEPARATOR};
use crate::{DecodeError, DecodeLimits, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Dict keys may appear in any order; later duplicates overwrite earlier ones.
    Lenient,
    /// Dict keys must be strictly ascending.
    Canonical,
}

/// Recursive-descent decoder over a borrowed byte buffer.
///
/// The decoder owns a cursor into `data`. Each call to [`Decoder::next_value`] parses exactly one
/// value starting at the cursor and leaves the cursor just past it. After an error the decoder
/// state is unspecified and the decoder should be discarded.
#[derive(Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    limits: DecodeLimits,
    depth: usize,
    mode: Mode,
}

impl<'a> Decoder<'a> {
    /// Construct a decoder with [`DecodeLimits::default`].
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_mode(data, DecodeLimits::default(), Mode::Lenient)
    }

    /// Construct a decoder with explicit limits.
    ///
    /// # Errors
    ///
    /// Returns `InputLenLimitExceeded` if `data` is longer than `limits.max_input_bytes`.
    pub fn with_limits(data: &'a [u8], limits: DecodeLimits) -> Result<Self, DecodeError> {
        check_input_len(data, limits)?;
        Ok(Self::with_mode(data, limits, Mode::Lenient))
    }

    const fn with_mode(data: &'a [u8], limits: DecodeLimits, mode: Mode) -> Self {
        Self {
            data,
            pos: 0,
            limits,
            depth: 0,
            mode,
        }
    }

    /// Return the current byte offset in the input.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once every input byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Return the bytes not yet consumed.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    /// Parse the next value and advance the cursor past it.
    ///
    /// Returns `Ok(None)` if the input is already exhausted.
    ///
    /// # Errors
    ///
    /// Returns the first grammar or limit violation encountered.
    pub fn next_value(&mut self) -> Result<Option<Value>, DecodeError> {
        if self.is_finished() {
            return Ok(None);
        }
        self.parse_value().map(Some)
    }

    /// Assert that no input remains.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedByte` carrying the first unconsumed byte and its offset.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.peek() {
            Some(b) => Err(DecodeError::new(ErrorCode::UnexpectedByte, b, self.pos)),
            None => Ok(()),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    #[inline]
    fn peek_next(&self) -> Option<u8> {
        self.data.get(self.pos + 1).copied()
    }

    fn read_exact(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| DecodeError::eof(ErrorCode::BadString, self.data.len()))?;
        let s = &self.data[self.pos..end];
        self.pos = end;
        Ok(s)
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        let off = self.pos;
        let b = self
            .peek()
            .ok_or_else(|| DecodeError::eof(ErrorCode::UnexpectedByte, off))?;
        match b {
            INT_BEGIN => {
                self.pos += 1;
                self.parse_int().map(Value::Integer)
            }
            b'0'..=b'9' => self.parse_bytes().map(Value::Bytes),
            LIST_BEGIN => {
                self.enter(b, off)?;
                self.pos += 1;
                let items = self.parse_list()?;
                self.depth -= 1;
                Ok(Value::List(items))
            }
            DICT_BEGIN => {
                self.enter(b, off)?;
                self.pos += 1;
                let dict = self.parse_dict()?;
                self.depth -= 1;
                Ok(Value::Dict(dict))
            }
            other => Err(DecodeError::new(ErrorCode::UnexpectedByte, other, off)),
        }
    }

    fn enter(&mut self, byte: u8, off: usize) -> Result<(), DecodeError> {
        if self.depth >= self.limits.max_depth {
            return Err(DecodeError::new(ErrorCode::DepthLimitExceeded, byte, off));
        }
        self.depth += 1;
        Ok(())
    }

    /// Parses `[-]digit+e`; the leading `i` is already consumed.
    fn parse_int(&mut self) -> Result<i64, DecodeError> {
        let negative = self.peek() == Some(MINUS);
        if negative {
            self.pos += 1;
        }
        let bound = if negative {
            i64::MIN.unsigned_abs()
        } else {
            i64::MAX.unsigned_abs()
        };

        match self.peek() {
            None => return Err(DecodeError::eof(ErrorCode::BadInteger, self.pos)),
            Some(b'0') if negative => {
                return Err(DecodeError::new(ErrorCode::BadInteger, b'0', self.pos));
            }
            Some(b'0') => {
                if let Some(d) = self.peek_next().filter(u8::is_ascii_digit) {
                    return Err(DecodeError::new(ErrorCode::BadInteger, d, self.pos + 1));
                }
            }
            Some(b) if !b.is_ascii_digit() => {
                return Err(DecodeError::new(ErrorCode::BadInteger, b, self.pos));
            }
            Some(_) => {}
        }

        let mut magnitude: u64 = 0;
        loop {
            let off = self.pos;
            let b = self
                .peek()
                .ok_or_else(|| DecodeError::eof(ErrorCode::BadInteger, off))?;
            if b == END {
                self.pos += 1;
                break;
            }
            let bad = DecodeError::new(ErrorCode::BadInteger, b, off);
            let d = digit_value(b).ok_or(bad)?;
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u64::from(d)))
                .filter(|m| *m <= bound)
                .ok_or(bad)?;
            self.pos += 1;
        }

        // magnitude <= bound, so neither conversion can leave the i64 range.
        Ok(if negative {
            0_i64.wrapping_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).unwrap_or(i64::MAX)
        })
    }

    /// Parses `digit+:payload`; the cursor sits on the first length digit.
    fn parse_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        let start = self.pos;
        if self.peek() == Some(b'0') {
            if let Some(d) = self.peek_next().filter(u8::is_ascii_digit) {
                return Err(DecodeError::new(ErrorCode::BadString, d, start + 1));
            }
        }

        let mut len: usize = 0;
        loop {
            let off = self.pos;
            let b = self
                .peek()
                .ok_or_else(|| DecodeError::eof(ErrorCode::BadString, off))?;
            if b == SEPARATOR {
                self.pos += 1;
                break;
            }
            let bad = DecodeError::new(ErrorCode::BadString, b, off);
            let d = digit_value(b).ok_or(bad)?;
            len = len
                .checked_mul(10)
                .and_then(|l| l.checked_add(usize::from(d)))
                .ok_or(bad)?;
            self.pos += 1;
        }

        if len > self.limits.max_bytes_len {
            return Err(DecodeError::new(
                ErrorCode::BytesLenLimitExceeded,
                self.data[start],
                start,
            ));
        }
        self.read_exact(len).map(<[u8]>::to_vec)
    }

    /// Parses `value* e`; the leading `l` is already consumed.
    fn parse_list(&mut self) -> Result<Vec<Value>, DecodeError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(DecodeError::eof(ErrorCode::BadList, self.pos)),
                Some(END) => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(_) => items.push(self.parse_value()?),
            }
        }
    }

    /// Parses `(key value)* e`; the leading `d` is already consumed.
    fn parse_dict(&mut self) -> Result<Dict, DecodeError> {
        let mut dict = Dict::new();
        loop {
            let key_off = self.pos;
            let first = match self.peek() {
                None => return Err(DecodeError::eof(ErrorCode::BadDictKey, key_off)),
                Some(END) => {
                    self.pos += 1;
                    return Ok(dict);
                }
                Some(b) => b,
            };

            let Value::Bytes(key) = self.parse_value()? else {
                return Err(DecodeError::new(ErrorCode::BadDictKey, first, key_off));
            };
            if self.mode == Mode::Canonical {
                if let Some((prev, _)) = dict.last_key_value() {
                    if key <= *prev {
                        return Err(DecodeError::new(
                            ErrorCode::NonCanonicalDictOrder,
                            first,
                            key_off,
                        ));
                    }
                }
            }

            if self.is_finished() {
                return Err(DecodeError::eof(ErrorCode::BadDictValue, self.pos));
            }
            let value = self.parse_value()?;
            dict.insert(key, value);
        }
    }
}

fn check_input_len(data: &[u8], limits: DecodeLimits) -> Result<(), DecodeError> {
    if data.len() > limits.max_input_bytes {
        return Err(DecodeError::eof(ErrorCode::InputLenLimitExceeded, 0));
    }
    Ok(())
}

fn decode_single(data: &[u8], limits: DecodeLimits, mode: Mode) -> Result<Value, DecodeError> {
    check_input_len(data, limits)?;
    let mut decoder = Decoder::with_mode(data, limits, mode);
    let value = decoder
        .next_value()?
        .ok_or_else(|| DecodeError::eof(ErrorCode::UnexpectedByte, 0))?;
    decoder.finish()?;
    Ok(value)
}

#[cfg(feature = "tracing")]
fn trace_failure(op: &'static str, len: usize, err: &DecodeError) {
    tracing::debug!(
        op,
        input_len = len,
        code = ?err.code,
        byte = err.byte,
        offset = err.offset,
        "bencode input rejected"
    );
}

fn traced<T>(op: &'static str, data: &[u8], res: Result<T, DecodeError>) -> Result<T, DecodeError> {
    #[cfg(feature = "tracing")]
    if let Err(err) = &res {
        trace_failure(op, data.len(), err);
    }
    #[cfg(not(feature = "tracing"))]
    let _ = (op, data);
    res
}

/// Decode exactly one bencode value from `data` using [`DecodeLimits::default`].
///
/// Dict keys may appear in any order; a repeated key keeps its last value.
///
/// # Errors
///
/// Returns the first grammar violation, `UnexpectedByte` for trailing bytes after the value, or
/// `UnexpectedByte` at offset 0 for empty input.
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    decode_with_limits(data, DecodeLimits::default())
}

/// Decode exactly one bencode value from `data` with explicit limits.
///
/// # Errors
///
/// As [`decode`], plus the limit error codes.
pub fn decode_with_limits(data: &[u8], limits: DecodeLimits) -> Result<Value, DecodeError> {
    traced("decode", data, decode_single(data, limits, Mode::Lenient))
}

/// Decode exactly one bencode value, requiring canonical form.
///
/// # Errors
///
/// As [`decode`], plus `NonCanonicalDictOrder` if dict keys are not strictly ascending.
pub fn decode_canonical(data: &[u8]) -> Result<Value, DecodeError> {
    traced(
        "decode_canonical",
        data,
        decode_single(data, DecodeLimits::default(), Mode::Canonical),
    )
}

/// Validate that `data` is a single bencode value in canonical form.
///
/// Every integer and length is already minimal by the grammar, so canonical form reduces to
/// strictly ascending dict keys at every level.
///
/// # Errors
///
/// As [`decode_canonical`].
pub fn validate_canonical(data: &[u8]) -> Result<CanonicalBytesRef<'_>, DecodeError> {
    decode_canonical(data).map(|_| CanonicalBytesRef::new(data))
}
