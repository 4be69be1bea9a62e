use num_bigint::{BigInt, BigUint, Sign};

use crate::{raw, Config};

/// Errors that may occur when coding a `GrowingVarInt`.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The starting width, maximum width or growth function cannot produce a valid width schedule.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The destination buffer cannot hold the encoded value.
    #[error("insufficient space: need {needed} bytes, {available} available")]
    OutOfSpace { needed: usize, available: usize },
    /// Reached end-of-buffer unexpectedly.
    ///
    /// This may happen if you attempt to decode an empty buffer or if the buffer ends before the
    /// group that terminates the value.
    #[error("unexpected end of buffer")]
    UnexpectedEob,
    /// The value read is larger than the destination type.
    #[error("decoded value overflows the destination type")]
    Overflow,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Maps negative values to odd magnitudes and non-negative values to even magnitudes, so that
/// values close to zero of either sign produce small output.
pub fn zigzag(v: &BigInt) -> BigUint {
    match v.sign() {
        Sign::Minus => ((v.magnitude() - 1u32) << 1u32) + 1u32,
        _ => v.magnitude() << 1u32,
    }
}

/// Inverts `zigzag()`.
pub fn unzigzag(m: BigUint) -> BigInt {
    let negative = m.bit(0);
    let half = BigInt::from(m >> 1u32);
    if negative {
        -(half + 1u32)
    } else {
        half
    }
}

#[inline]
pub(crate) fn zigzag_i128(v: i128) -> u128 {
    ((v >> 127) ^ (v << 1)) as u128
}

#[inline]
pub(crate) fn unzigzag_i128(v: u128) -> i128 {
    (v >> 1) as i128 ^ -((v & 1) as i128)
}

/// Base integer trait for growing varints. Provides internal APIs to facilitate the transforms in
/// the `GrowingVarInt` trait.
///
/// Every implementation zigzags its value, so all integer types share one encoding.
pub trait Int: Sized {
    fn to_growing_varint_raw(&self) -> BigUint;
    fn from_growing_varint_raw(raw: BigUint) -> Option<Self>;
}

impl Int for BigInt {
    #[inline]
    fn to_growing_varint_raw(&self) -> BigUint {
        zigzag(self)
    }
    #[inline]
    fn from_growing_varint_raw(raw: BigUint) -> Option<Self> {
        Some(unzigzag(raw))
    }
}

impl Int for i128 {
    #[inline]
    fn to_growing_varint_raw(&self) -> BigUint {
        zigzag(&BigInt::from(*self))
    }
    #[inline]
    fn from_growing_varint_raw(raw: BigUint) -> Option<Self> {
        unzigzag(raw).try_into().ok()
    }
}

impl Int for u128 {
    #[inline]
    fn to_growing_varint_raw(&self) -> BigUint {
        BigUint::from(*self) << 1u32
    }
    #[inline]
    fn from_growing_varint_raw(raw: BigUint) -> Option<Self> {
        unzigzag(raw).try_into().ok()
    }
}

// Anything that fits in an i128 zigzags without leaving machine words.
macro_rules! impl_int {
    ($int:ty) => {
        impl Int for $int {
            #[inline(always)]
            fn to_growing_varint_raw(&self) -> BigUint {
                BigUint::from(zigzag_i128(i128::from(*self)))
            }
            #[inline(always)]
            fn from_growing_varint_raw(raw: BigUint) -> Option<Self> {
                let raw = u128::try_from(&raw).ok()?;
                unzigzag_i128(raw).try_into().ok()
            }
        }
    };
}
impl_int!(u16);
impl_int!(u32);
impl_int!(u64);
impl_int!(i16);
impl_int!(i32);
impl_int!(i64);

/// A decoded value together with the offset of the first byte after its frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decoded {
    pub value: BigInt,
    pub following_offset: usize,
}

/// Trait for integer types that can be growing varint coded.
///
/// Values are zigzag coded before encoding/after decoding.
pub trait GrowingVarInt: Int {
    /// Returns the number of bytes required to encode `self` with `config`.
    #[inline]
    fn growing_varint_len(&self, config: &Config) -> Result<usize> {
        config.magnitude_len(&self.to_growing_varint_raw())
    }

    /// Encode `self` to `buf` starting at `offset` and return the offset following the written
    /// bytes.
    ///
    /// The configuration and the available space are both checked before anything is written,
    /// so on error `buf` is left untouched.
    fn encode_growing_varint(
        &self,
        buf: &mut [u8],
        offset: usize,
        config: &Config,
    ) -> Result<usize> {
        let raw = self.to_growing_varint_raw();
        let len = config.magnitude_len(&raw)?;
        let available = buf.len().saturating_sub(offset);
        if len > available {
            return Err(Error::OutOfSpace {
                needed: len,
                available,
            });
        }
        let written = raw::encode(raw, config, &mut buf[offset..offset + len])?;
        Ok(offset + written)
    }

    /// Decode an integer from the frame starting at `offset` in `buf` and return the value and
    /// the offset following the frame.
    #[inline]
    fn decode_growing_varint(
        buf: &[u8],
        offset: usize,
        config: &Config,
    ) -> Result<(Self, usize)> {
        let tail = buf.get(offset..).ok_or(Error::UnexpectedEob)?;
        let (raw, len) = raw::decode(tail, config)?;
        Ok((
            Self::from_growing_varint_raw(raw).ok_or(Error::Overflow)?,
            offset + len,
        ))
    }

    /// Encode `self` to an owned buffer of exactly the encoded length and return it.
    fn to_growing_varint_bytes(&self, config: &Config) -> Result<Vec<u8>> {
        let raw = self.to_growing_varint_raw();
        let mut buf = vec![0u8; config.magnitude_len(&raw)?];
        raw::encode(raw, config, &mut buf)?;
        Ok(buf)
    }
}

impl GrowingVarInt for BigInt {}
impl GrowingVarInt for u16 {}
impl GrowingVarInt for u32 {}
impl GrowingVarInt for u64 {}
impl GrowingVarInt for u128 {}
impl GrowingVarInt for i16 {}
impl GrowingVarInt for i32 {}
impl GrowingVarInt for i64 {}
impl GrowingVarInt for i128 {}

/// Encodes `value` with the flat configuration.
pub fn encode(value: &BigInt) -> Result<Vec<u8>> {
    Config::flat().encode(value)
}

/// Encodes `value` into `buf` at `offset` with `config`, returning the offset following the
/// written bytes.
pub fn encode_into(
    value: &BigInt,
    buf: &mut [u8],
    offset: usize,
    config: &Config,
) -> Result<usize> {
    config.encode_into(value, buf, offset)
}

/// Decodes a flat-configuration value whose frame starts at `offset`.
pub fn decode(buf: &[u8], offset: usize) -> Result<BigInt> {
    Config::flat().decode(buf, offset)
}

/// Decodes a flat-configuration value whose frame starts at `offset`, returning it with the
/// offset of the byte following the frame.
pub fn decode_with_offset(buf: &[u8], offset: usize) -> Result<Decoded> {
    Config::flat().decode_with_offset(buf, offset)
}
