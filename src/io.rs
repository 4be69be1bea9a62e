//! Extensions to `std::io` traits to support reading/writing growing varints.
use std::io::{BufRead, ErrorKind, Read, Result, Write};

use crate::{raw, Config, Error, GrowingVarInt};

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        let kind = match value {
            Error::UnexpectedEob => ErrorKind::UnexpectedEof,
            Error::Overflow => ErrorKind::InvalidData,
            Error::InvalidConfiguration(_) => ErrorKind::InvalidInput,
            Error::OutOfSpace { .. } => ErrorKind::WriteZero,
        };
        std::io::Error::new(kind, value)
    }
}

/// Growing varint code a value and write it to `w`. Returns the number of bytes
/// written.
#[inline]
pub fn write_growing_varint<GV: GrowingVarInt>(
    v: &GV,
    w: &mut impl Write,
    config: &Config,
) -> Result<usize> {
    let v = v.to_growing_varint_bytes(config)?;
    w.write_all(&v)?;
    Ok(v.len())
}

/// Read and decode a growing varint value from `r`.
///
/// Reads exactly the bytes of one frame, one group at a time.
/// Prefer `read_growing_varint_buf()` wherever possible as it should be more efficient.
pub fn read_growing_varint<GV: GrowingVarInt>(r: &mut impl Read, config: &Config) -> Result<GV> {
    let frame = raw::read_frame(config, |group: &mut [u8]| r.read_exact(group))?;
    let (raw, _) = raw::decode(&frame, config)?;
    GV::from_growing_varint_raw(raw).ok_or_else(|| Error::Overflow.into())
}

/// Read and decode a growing varint value from `r`.
#[inline]
pub fn read_growing_varint_buf<GV: GrowingVarInt>(
    r: &mut impl BufRead,
    config: &Config,
) -> Result<GV> {
    let buf = r.fill_buf()?;
    match raw::decode(buf, config) {
        Ok((raw, len)) => {
            r.consume(len);
            GV::from_growing_varint_raw(raw).ok_or_else(|| Error::Overflow.into())
        }
        // The frame may continue past the buffered bytes.
        Err(Error::UnexpectedEob) => read_growing_varint(r, config),
        Err(e) => Err(e.into()),
    }
}
