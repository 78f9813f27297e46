//! # canon-bencode
//!
//! Strict bencode decoding with precise error offsets, and canonical, deterministic encoding.
//!
//! ## Design principles
//!
//! - **Strict decoding.**
//!   [`decode`] accepts exactly one value and rejects every redundant textual form: `-0`,
//!   leading zeros in integers and string lengths, truncated strings, unterminated collections,
//!   and trailing bytes. The first violation aborts the parse and is reported with the offending
//!   byte and its zero-based offset.
//! - **Canonical encoding.**
//!   [`encode`] is total and deterministic: dict entries are emitted in ascending unsigned byte
//!   order of their keys, so two equal [`Value`]s always produce identical bytes. Those bytes can
//!   be compared or hashed directly (see [`CanonicalBytes`]).
//! - **Byte strings are bytes.**
//!   Nothing assumes byte strings are text; keys compare by raw bytes, never by locale.
//!
//! ## Wire format
//!
//! | Kind | Encoding | Example |
//! |------|----------|---------|
//! | Integer | `i` `[-]` `digit+` `e` | `i-3e` |
//! | Byte string | `digit+` `:` payload | `4:spam` |
//! | List | `l` value* `e` | `l4:spami42ee` |
//! | Dict | `d` (key value)* `e` | `d3:cow3:mooe` |
//!
//! ```
//! use canon_bencode::{decode, encode, Value};
//!
//! let v = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
//! assert_eq!(v.get(b"cow"), Some(&Value::string("moo")));
//! assert_eq!(encode(&v), b"d3:cow3:moo4:spam4:eggse");
//! ```
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`DecodeError`].
//! - `sha2` *(default)*: enables SHA-256 fingerprint helpers for canonical bytes.
//! - `serde`: implements `Serialize`/`Deserialize` for [`Value`].
//! - `tracing`: emits a `debug` event whenever an input is rejected.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and requires `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod canonical;
mod encode;
mod error;
mod limits;
mod parse;
#[cfg(feature = "serde")]
mod serde_impl;
mod value;
mod wire;

pub use crate::canonical::{CanonicalBytes, CanonicalBytesRef};
pub use crate::encode::{encode, encode_into, encoded_len, DictEncoder, Encoder};
pub use crate::error::{DecodeError, EncodeError, ErrorCode};
pub use crate::limits::{DecodeLimits, DEFAULT_MAX_DEPTH};
pub use crate::parse::{
    decode, decode_canonical, decode_with_limits, validate_canonical, Decoder,
};
pub use crate::value::{Dict, Value, ValueKind};
