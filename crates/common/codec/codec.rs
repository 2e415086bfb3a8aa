//! # statesync-codec
//!
//! Deterministic binary encoding for structured account-state values.
//!
//! The format belongs to the bencode family, extended with unicode text and null:
//!
//! | Value | Encoding |
//! |---|---|
//! | null | `n` |
//! | booleans | `t` / `f` |
//! | integer | `i<decimal>e` |
//! | binary | `<length>:<bytes>` |
//! | text | `u<length>:<utf-8 bytes>` |
//! | list | `l<items>e` |
//! | dictionary | `d<key><value>...e` |
//!
//! Dictionary keys are either binary or text. They are written in ascending order
//! (all binary keys first, then text keys, each group compared bytewise), so a value
//! has exactly one encoding. The decoder rejects anything that is not in that
//! canonical form.
//!
//! ```rust
//! use statesync_codec::{Value, decode::ValueDecode, encode::ValueEncode};
//!
//! let value = Value::dictionary([("balance", Value::from(10u64)), ("name", Value::from("alice"))]);
//! let encoded = value.encode_to_vec();
//! assert_eq!(encoded, b"du7:balancei10eu4:nameu5:alicee");
//! assert_eq!(Value::decode(&encoded).unwrap(), value);
//! ```

pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod value;

pub use value::{Key, Value};
