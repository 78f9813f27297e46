use alloc::vec::Vec;

use crate::canonical::{CanonicalBytes, CanonicalBytesRef};
use crate::value::Value;
use crate::wire::{
    bytes_encoded_len, fmt_decimal, int_encoded_len, DICT_BEGIN, END, INT_BEGIN, LIST_BEGIN,
    MAX_DECIMAL_DIGITS, MINUS, SEPARATOR,
};
use crate::{DecodeError, EncodeError};

trait Sink {
    fn write(&mut self, bytes: &[u8]);

    fn write_u8(&mut self, byte: u8) {
        self.write(&[byte]);
    }

    fn write_int(&mut self, v: i64) {
        let mut buf = [0u8; MAX_DECIMAL_DIGITS];
        self.write_u8(INT_BEGIN);
        if v < 0 {
            self.write_u8(MINUS);
        }
        self.write(fmt_decimal(v.unsigned_abs(), &mut buf));
        self.write_u8(END);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut buf = [0u8; MAX_DECIMAL_DIGITS];
        self.write(fmt_decimal(bytes.len() as u64, &mut buf));
        self.write_u8(SEPARATOR);
        self.write(bytes);
    }
}

impl Sink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn write_u8(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// Counts bytes instead of storing them.
struct CountSink(usize);

impl Sink for CountSink {
    fn write(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }

    fn write_u8(&mut self, _byte: u8) {
        self.0 += 1;
    }

    fn write_int(&mut self, v: i64) {
        self.0 += int_encoded_len(v);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.0 += bytes_encoded_len(bytes.len());
    }
}

fn encode_value<S: Sink>(sink: &mut S, value: &Value) {
    match value {
        Value::Integer(n) => sink.write_int(*n),
        Value::Bytes(b) => sink.write_bytes(b),
        Value::List(items) => {
            sink.write_u8(LIST_BEGIN);
            for item in items {
                encode_value(sink, item);
            }
            sink.write_u8(END);
        }
        Value::Dict(dict) => {
            // BTreeMap iterates in ascending byte order of keys.
            sink.write_u8(DICT_BEGIN);
            for (k, v) in dict {
                sink.write_bytes(k);
                encode_value(sink, v);
            }
            sink.write_u8(END);
        }
    }
}

/// Encode `value` into canonical bencode bytes.
///
/// Dict entries are emitted in ascending byte order of their keys, so equal values always encode
/// to identical bytes.
#[must_use]
pub fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    encode_value(&mut out, value);
    out
}

/// Append the canonical encoding of `value` to `out`.
pub fn encode_into(value: &Value, out: &mut Vec<u8>) {
    out.reserve(encoded_len(value));
    encode_value(out, value);
}

/// Exact length in bytes of the canonical encoding of `value`.
#[must_use]
pub fn encoded_len(value: &Value) -> usize {
    let mut sink = CountSink(0);
    encode_value(&mut sink, value);
    sink.0
}

/// Streaming encoder that writes canonical bencode directly into a `Vec<u8>`.
///
/// Containers are written through closures. If a closure returns an error, everything written for
/// that container is removed again and the error is passed through unchanged.
///
/// ```
/// use canon_bencode::{EncodeError, Encoder, Value};
///
/// let mut enc = Encoder::new();
/// enc.dict(|d| {
///     d.entry(b"spam", |e| {
///         e.list(|l| {
///             l.str("a").int(1);
///             Ok::<_, EncodeError>(())
///         })
///     })?;
///     d.entry_value(b"cow", &Value::string("moo"));
///     Ok::<_, EncodeError>(())
/// })
/// .unwrap();
/// assert_eq!(enc.as_bytes(), b"d3:cow3:moo4:spaml1:ai1eee");
/// ```
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
    values: usize,
}

impl Encoder {
    /// Create a new encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            values: 0,
        }
    }

    /// Create an encoder with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            values: 0,
        }
    }

    /// Return the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no bytes have been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow the bytes emitted so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume and return the encoded bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Consume and return the bytes as [`CanonicalBytes`].
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer does not hold exactly one value (for example nothing was
    /// written, or two top-level values were).
    pub fn into_canonical(self) -> Result<CanonicalBytes, DecodeError> {
        crate::validate_canonical(&self.buf)?;
        Ok(CanonicalBytes::new_unchecked(self.buf))
    }

    /// Encode an integer.
    pub fn int(&mut self, v: i64) -> &mut Self {
        self.buf.write_int(v);
        self.values += 1;
        self
    }

    /// Encode a byte string.
    pub fn bytes(&mut self, b: &[u8]) -> &mut Self {
        self.buf.write_bytes(b);
        self.values += 1;
        self
    }

    /// Encode UTF-8 text as a byte string.
    pub fn str(&mut self, s: &str) -> &mut Self {
        self.bytes(s.as_bytes())
    }

    /// Encode an owned value tree.
    pub fn value(&mut self, v: &Value) -> &mut Self {
        encode_value(&mut self.buf, v);
        self.values += 1;
        self
    }

    /// Splice already validated canonical bytes as the next value.
    pub fn raw(&mut self, v: CanonicalBytesRef<'_>) -> &mut Self {
        self.buf.extend_from_slice(v.as_bytes());
        self.values += 1;
        self
    }

    /// Encode a list whose elements are written by `f`, in order.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`; the partial list is discarded.
    pub fn list<F, E>(&mut self, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        let start = self.buf.len();
        let values = self.values;
        self.buf.push(LIST_BEGIN);
        if let Err(err) = f(self) {
            self.buf.truncate(start);
            self.values = values;
            return Err(err);
        }
        self.buf.push(END);
        self.values = values + 1;
        Ok(())
    }

    /// Encode a dict whose entries are written by `f` in any key order.
    ///
    /// Entries are sorted by key when the dict is closed; a repeated key keeps its last value.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`; nothing is written in that case.
    pub fn dict<F, E>(&mut self, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut DictEncoder) -> Result<(), E>,
    {
        let mut d = DictEncoder {
            entries: Vec::new(),
        };
        f(&mut d)?;
        d.write_into(&mut self.buf);
        self.values += 1;
        Ok(())
    }
}

/// Collects dict entries for [`Encoder::dict`].
#[derive(Debug)]
pub struct DictEncoder {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl DictEncoder {
    /// Insert an entry whose value is written by `f`.
    ///
    /// `f` must write exactly one value.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or [`EncodeError::EntryValueCount`] if `f` wrote zero or
    /// several values. The entry is dropped in both cases.
    pub fn entry<F, E>(&mut self, key: &[u8], f: F) -> Result<&mut Self, E>
    where
        F: FnOnce(&mut Encoder) -> Result<(), E>,
        E: From<EncodeError>,
    {
        let mut enc = Encoder::new();
        f(&mut enc)?;
        if enc.values != 1 {
            return Err(EncodeError::EntryValueCount {
                written: enc.values,
            }
            .into());
        }
        self.entries.push((key.to_vec(), enc.into_vec()));
        Ok(self)
    }

    /// Insert an entry holding an owned value.
    pub fn entry_value(&mut self, key: &[u8], value: &Value) -> &mut Self {
        self.entries.push((key.to_vec(), encode(value)));
        self
    }

    /// Number of entries collected so far, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write_into(mut self, out: &mut Vec<u8>) {
        // Stable sort keeps insertion order among equal keys, so the last one wins below.
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        out.push(DICT_BEGIN);
        let mut iter = self.entries.iter().peekable();
        while let Some((key, value)) = iter.next() {
            if iter.peek().is_some_and(|(next, _)| next == key) {
                continue;
            }
            out.write_bytes(key);
            out.extend_from_slice(value);
        }
        out.push(END);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn counted_length_matches_output() {
        let v: Value = [
            ("b", Value::List(vec![Value::Integer(i64::MIN), Value::string("")])),
            ("a", Value::Integer(0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(encoded_len(&v), encode(&v).len());
    }

    #[test]
    fn encode_into_appends() {
        let mut out = b"xx".to_vec();
        encode_into(&Value::Integer(7), &mut out);
        assert_eq!(out, b"xxi7e");
    }

    #[test]
    fn failed_list_is_rolled_back() {
        let mut enc = Encoder::new();
        enc.int(1);
        let res = enc.list(|l| {
            l.int(2);
            Err("boom")
        });
        assert_eq!(res, Err("boom"));
        assert_eq!(enc.as_bytes(), b"i1e");
        assert_eq!(enc.values, 1);
    }

    #[test]
    fn dict_encoder_sorts_and_keeps_last_duplicate() {
        let mut enc = Encoder::new();
        enc.dict(|d| {
            d.entry_value(b"zz", &Value::Integer(1))
                .entry_value(b"a", &Value::Integer(2))
                .entry_value(b"zz", &Value::Integer(3));
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(enc.as_bytes(), b"d1:ai2e2:zzi3ee");
    }
}
