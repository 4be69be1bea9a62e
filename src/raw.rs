//! Routines for working with raw (zigzagged, non-negative) growing-width frames.
//!
//! Values of other types are shuffled to/from raw magnitudes using the `core::Int` trait.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::config::Config;
use crate::core::{Error, Result};
use crate::{CONTINUE, REST_MASK, SIGNIFICANT_BITS};

/// Number of magnitude bits carried by a group of `width` bytes.
#[inline]
fn group_bits(width: usize) -> u64 {
    (width as u64).saturating_mul(8) - 1
}

#[inline]
fn low_byte(m: &BigUint) -> u8 {
    m.iter_u64_digits().next().unwrap_or(0) as u8
}

/// Returns the number of bytes required to encode `m` with `config`.
///
/// Frames of exactly `k` groups hold the magnitudes in `[S(k - 1), S(k))`, where `S(k)` is the
/// sum of `2^B(j)` for `j` in `1..=k` and `B(j)` counts the bits carried by the first `j` groups.
pub(crate) fn encoded_len(m: &BigUint, config: &Config) -> Result<usize> {
    let bits = m.bits();
    let mut widths = config.widths();
    let mut limit = BigUint::zero();
    let mut carried = 0u64;
    let mut len = 0usize;
    let mut width = widths.next_width()?;
    loop {
        len = len.saturating_add(width);
        carried = carried.saturating_add(group_bits(width));
        let last = if carried > bits {
            true
        } else {
            limit += BigUint::one() << carried;
            *m < limit
        };
        // The schedule advances after every group, the last one included.
        width = widths.next_width()?;
        if last {
            return Ok(len);
        }
    }
}

/// Encodes `m` to the front of `buf` and returns the number of bytes written.
///
/// # Panics
///
/// If `buf` is shorter than `encoded_len(&m, config)`.
pub(crate) fn encode(mut m: BigUint, config: &Config, buf: &mut [u8]) -> Result<usize> {
    let mut widths = config.widths();
    let mut width = widths.next_width()?;
    let mut pos = 0;
    loop {
        for _ in 1..width {
            buf[pos] = low_byte(&m);
            m >>= 8u32;
            pos += 1;
        }

        let rest = &m >> SIGNIFICANT_BITS;
        let more = !rest.is_zero();
        buf[pos] = (low_byte(&m) & REST_MASK) | if more { CONTINUE } else { 0 };
        pos += 1;
        width = widths.next_width()?;
        if !more {
            return Ok(pos);
        }
        // Longer frames start where the shorter ones end.
        m = rest - 1u32;
    }
}

/// Decodes a frame from the front of `buf`, returning the raw magnitude and the number of bytes
/// consumed.
pub(crate) fn decode(buf: &[u8], config: &Config) -> Result<(BigUint, usize)> {
    if buf.is_empty() {
        return Err(Error::UnexpectedEob);
    }

    let mut groups = Vec::new();
    let mut widths = config.widths();
    let mut end = 0usize;
    loop {
        let width = widths.next_width()?;
        end = match end.checked_add(width) {
            Some(e) if e <= buf.len() => e,
            _ => {
                log::trace!("frame runs past the {} available bytes", buf.len());
                return Err(Error::UnexpectedEob);
            }
        };
        groups.push(width);
        if buf[end - 1] & CONTINUE == 0 {
            widths.next_width()?;
            break;
        }
    }

    let len = end;
    let mut m: Option<BigUint> = None;
    for width in groups.into_iter().rev() {
        let start = end - width;
        let (terminal, raw) = match buf[start..end].split_last() {
            Some(parts) => parts,
            None => return Err(Error::UnexpectedEob),
        };
        let mut acc = match m {
            Some(following) => (following + 1u32) << SIGNIFICANT_BITS,
            None => BigUint::zero(),
        };
        acc |= BigUint::from(terminal & REST_MASK);
        for &b in raw.iter().rev() {
            acc = (acc << 8u32) | BigUint::from(b);
        }
        m = Some(acc);
        end = start;
    }

    Ok((m.unwrap_or_default(), len))
}

/// Pulls one frame worth of bytes through `fill`, using the width schedule to find where the frame
/// ends. `fill` must fill the whole slice it is handed or fail.
pub(crate) fn read_frame<E, F>(config: &Config, mut fill: F) -> std::result::Result<Vec<u8>, E>
where
    E: From<Error>,
    F: FnMut(&mut [u8]) -> std::result::Result<(), E>,
{
    let mut frame = Vec::new();
    let mut widths = config.widths();
    loop {
        let width = widths.next_width()?;
        let start = frame.len();
        frame.resize(start + width, 0);
        fill(&mut frame[start..])?;
        if frame[start + width - 1] & CONTINUE == 0 {
            widths.next_width()?;
            return Ok(frame);
        }
    }
}
