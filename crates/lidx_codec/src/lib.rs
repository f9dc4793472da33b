//! # lidx Codec
//!
//! Variable-length integer encoding for the lidx key schema.
//!
//! Every identifier lidx persists (document IDs, word IDs, the word
//! counter) and every identifier list (postings, per-document word sets) is
//! stored as base-128 varints. Small IDs take one byte; `u64::MAX` takes ten.
//!
//! ## Usage
//!
//! ```
//! use lidx_codec::{decode, encode};
//!
//! let mut buf = Vec::new();
//! encode(&mut buf, 300);
//! assert_eq!(buf, [0xac, 0x02]);
//!
//! let (value, next) = decode(&buf, 0).unwrap();
//! assert_eq!((value, next), (300, 2));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod reader;
mod varint;

pub use error::{CodecError, CodecResult};
pub use reader::VarintReader;
pub use varint::{
    decode, decode_all, encode, encode_all, encode_to_vec, encoded_len, MAX_VARINT_LEN,
};
