use alloc::vec::Vec;

use crate::value::Value;
use crate::DecodeError;

/// A validated canonical bencode value borrowed from an input buffer.
///
/// This is the product of [`crate::validate_canonical`]. The bytes are guaranteed to:
///
/// - represent exactly one bencode value, and
/// - already be in canonical form (dict keys strictly ascending at every level).
///
/// Two values are therefore equal iff their canonical bytes are equal, which makes these bytes
/// suitable as a content fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalBytesRef<'a> {
    bytes: &'a [u8],
}

impl<'a> CanonicalBytesRef<'a> {
    #[inline]
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Return the canonical bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(self) -> &'a [u8] {
        self.bytes
    }

    /// Length in bytes of the canonical representation.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` iff the encoding is empty (never the case for a valid value).
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode into an owned [`Value`].
    ///
    /// # Errors
    ///
    /// Only limit errors are possible, since the bytes were already validated.
    pub fn to_value(self) -> Result<Value, DecodeError> {
        crate::decode(self.bytes)
    }

    /// Compute the SHA-256 digest of the canonical bytes.
    #[cfg(feature = "sha2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha2")))]
    #[must_use]
    pub fn sha256(self) -> [u8; 32] {
        use sha2::{Digest, Sha256};
        let mut h = Sha256::new();
        h.update(self.bytes);
        h.finalize().into()
    }

    /// Copy into an owned [`CanonicalBytes`].
    #[must_use]
    pub fn to_owned(self) -> CanonicalBytes {
        CanonicalBytes {
            bytes: self.bytes.to_vec(),
        }
    }
}

impl AsRef<[u8]> for CanonicalBytesRef<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

/// An owned canonical bencode value.
///
/// Useful for durable storage and for comparing or hashing values by their bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalBytes {
    bytes: Vec<u8>,
}

impl CanonicalBytes {
    #[inline]
    pub(crate) const fn new_unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Validate and copy `bytes` into an owned canonical representation.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a single canonical bencode value.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        crate::validate_canonical(bytes).map(CanonicalBytesRef::to_owned)
    }

    /// Encode `value`; the result is canonical by construction.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::new_unchecked(crate::encode(value))
    }

    /// Borrow as a [`CanonicalBytesRef`].
    #[inline]
    #[must_use]
    pub fn as_canonical_ref(&self) -> CanonicalBytesRef<'_> {
        CanonicalBytesRef::new(&self.bytes)
    }

    /// Borrow the canonical bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes of the canonical representation.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` iff the encoding is empty (never the case for a valid value).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume and return the canonical bytes.
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decode into an owned [`Value`].
    ///
    /// # Errors
    ///
    /// Only limit errors are possible, since the bytes were already validated.
    pub fn to_value(&self) -> Result<Value, DecodeError> {
        self.as_canonical_ref().to_value()
    }

    /// Compute the SHA-256 digest of the canonical bytes.
    #[cfg(feature = "sha2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha2")))]
    #[must_use]
    pub fn sha256(&self) -> [u8; 32] {
        self.as_canonical_ref().sha256()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&Value> for CanonicalBytes {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
