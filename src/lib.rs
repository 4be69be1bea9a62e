//! This module implements a growing-width variable length coding scheme for arbitrary precision
//! integers.
//!
//! Values are first
//! [Zigzag](https://en.wikipedia.org/wiki/Variable-length_quantity#Zigzag_encoding) coded so
//! that small negative numbers produce small output, then written as a frame of byte groups.
//! Every byte of a group but the last is a raw little endian byte of the magnitude; the last byte
//! carries 7 more bits and a continuation flag in its high bit. The width of the first group and
//! how it grows from one group to the next are set by a [`Config`].
//!
//! With [`Config::flat()`] every group is a single byte and the frame looks like an
//! [LEB128](https://en.wikipedia.org/wiki/LEB128) stream, except that each continuation
//! subtracts one from the remaining magnitude. That makes the coding canonical: every value has
//! exactly one encoding and every well formed frame decodes to a different value. Wider
//! configurations trade a larger minimum size for fewer continuation bits on large magnitudes.
//! Decoding must use the configuration the value was encoded with.
//!
//! `GrowingVarInt` is implemented for `BigInt` and the primitive integer types; they all share
//! one encoding. Traits are provided to extend `bytes::{Buf,BufMut}`, and to handle these values
//! in `std::io::{Write,Read}`.
//!
//! ```
//! use bytes::Buf;
//! use num_bigint::BigInt;
//! use growing_varint::{Config, GrowingVarIntBuf, GrowingVarIntBufMut};
//!
//! let value: BigInt = "-123456789012345678901234567890".parse().unwrap();
//! let encoded = growing_varint::encode(&value).unwrap();
//! assert_eq!(growing_varint::decode(&encoded, 0).unwrap(), value);
//!
//! let config = Config::growing();
//! let mut buf_mut = vec![];
//! for v in (0..100i64).step_by(3) {
//!   buf_mut.put_growing_varint(&v, &config).unwrap();
//! }
//!
//! // NB: need a mutable slice to use as GrowingVarIntBuf
//! let mut buf = buf_mut.as_slice();
//! while let Ok(v) = buf.get_growing_varint::<i64>(&config) {
//!   assert_eq!(v % 3, 0);
//! }
//! assert!(!buf.has_remaining());
//! ```
mod bytes;
mod config;
pub(crate) mod core;
mod io;
mod raw;

pub use crate::bytes::{GrowingVarIntBuf, GrowingVarIntBufMut, GrowingVarIntIter};
pub use crate::config::{Config, GrowthFn, Widths, MAX_WIDTH};
pub use crate::core::{
    decode, decode_with_offset, encode, encode_into, unzigzag, zigzag, Decoded, Error,
    GrowingVarInt, Int, Result,
};
pub use crate::io::{read_growing_varint, read_growing_varint_buf, write_growing_varint};

/// Number of magnitude bits in the last byte of a group.
pub(crate) const SIGNIFICANT_BITS: u32 = 7;

/// Continuation flag on the last byte of a group.
pub(crate) const CONTINUE: u8 = 1 << SIGNIFICANT_BITS;

/// Mask for the magnitude bits of the last byte of a group.
pub(crate) const REST_MASK: u8 = CONTINUE - 1;
