//! Group width configuration for the growing-width frame.

use num_bigint::{BigInt, BigUint};

use crate::core::{Decoded, Error, Result};
use crate::{raw, GrowingVarInt};

/// Widest group a configuration may ask for. Every frame holds at least `starting_width` bytes and
/// encoding allocates whole groups, so the cap bounds the size of a single group.
pub const MAX_WIDTH: usize = 4096;

/// Maps the width of a completed group to the width of the next one.
pub type GrowthFn = fn(usize) -> usize;

fn identity(width: usize) -> usize {
    width
}

fn add_two(width: usize) -> usize {
    width + 2
}

/// Describes how many bytes each group of a frame occupies.
///
/// The first group is `starting_width` bytes wide. After each group, the last one included, the
/// width is recomputed with `growth` while it is still below `maximum_width`, and the result
/// is clamped to `maximum_width`.
///
/// ```
/// use growing_varint::Config;
///
/// let config = Config::growing();
/// let widths: Vec<usize> = config.widths().take(5).map(|w| w.unwrap()).collect();
/// assert_eq!(widths, [2, 4, 6, 8, 8]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    starting_width: usize,
    maximum_width: usize,
    growth: GrowthFn,
}

impl Config {
    /// Creates a configuration, rejecting a starting width of zero, a maximum width below the
    /// starting width or above [`MAX_WIDTH`].
    ///
    /// The growth function is only evaluated while walking the width schedule, so a growth
    /// function that yields a width below 1, or shrinks the width, is reported by the first
    /// operation that walks past that step. Every encode and decode takes one growth step after
    /// its final group, and encoding walks the schedule before writing.
    pub fn new(starting_width: usize, maximum_width: usize, growth: GrowthFn) -> Result<Self> {
        if starting_width < 1 {
            log::debug!("rejecting starting width {}", starting_width);
            return Err(Error::InvalidConfiguration(format!(
                "starting width must be at least 1, got {}",
                starting_width
            )));
        }
        if maximum_width < starting_width {
            log::debug!(
                "rejecting maximum width {} below starting width {}",
                maximum_width,
                starting_width
            );
            return Err(Error::InvalidConfiguration(format!(
                "maximum width {} is below starting width {}",
                maximum_width, starting_width
            )));
        }
        if maximum_width > MAX_WIDTH {
            log::debug!("rejecting maximum width {} above {}", maximum_width, MAX_WIDTH);
            return Err(Error::InvalidConfiguration(format!(
                "maximum width {} exceeds {}",
                maximum_width, MAX_WIDTH
            )));
        }
        Ok(Self {
            starting_width,
            maximum_width,
            growth,
        })
    }

    /// One byte per group: a plain 7-bit continuation stream.
    pub fn flat() -> Self {
        Self {
            starting_width: 1,
            maximum_width: 1,
            growth: identity,
        }
    }

    /// Starts at two bytes and grows by two bytes per group up to eight.
    pub fn growing() -> Self {
        Self {
            starting_width: 2,
            maximum_width: 8,
            growth: add_two,
        }
    }

    pub fn starting_width(&self) -> usize {
        self.starting_width
    }

    pub fn maximum_width(&self) -> usize {
        self.maximum_width
    }

    /// Returns the (endless) schedule of group widths.
    pub fn widths(&self) -> Widths {
        Widths {
            config: *self,
            current: self.starting_width,
            started: false,
            failed: false,
        }
    }

    /// Returns the number of bytes `value` occupies when encoded with this configuration.
    pub fn encoded_len(&self, value: &BigInt) -> Result<usize> {
        value.growing_varint_len(self)
    }

    /// Encodes `value` into a newly allocated buffer of exactly the encoded length.
    pub fn encode(&self, value: &BigInt) -> Result<Vec<u8>> {
        value.to_growing_varint_bytes(self)
    }

    /// Encodes `value` into `buf` starting at `offset` and returns the offset following the
    /// written bytes.
    ///
    /// Nothing is written if the configuration is invalid or `buf` is too short.
    pub fn encode_into(&self, value: &BigInt, buf: &mut [u8], offset: usize) -> Result<usize> {
        value.encode_growing_varint(buf, offset, self)
    }

    /// Decodes the value whose frame starts at `offset`.
    pub fn decode(&self, buf: &[u8], offset: usize) -> Result<BigInt> {
        self.decode_with_offset(buf, offset).map(|d| d.value)
    }

    /// Decodes the value whose frame starts at `offset`, also returning the offset of the first
    /// byte after the frame.
    pub fn decode_with_offset(&self, buf: &[u8], offset: usize) -> Result<Decoded> {
        let (value, following_offset) = BigInt::decode_growing_varint(buf, offset, self)?;
        Ok(Decoded {
            value,
            following_offset,
        })
    }

    /// Returns the exact frame length for an already zigzagged magnitude.
    pub(crate) fn magnitude_len(&self, magnitude: &BigUint) -> Result<usize> {
        raw::encoded_len(magnitude, self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::flat()
    }
}

/// Iterator over the group widths of a [`Config`].
///
/// Yields the starting width first. Once a growth step fails the error is yielded once and the
/// iterator ends; otherwise it never ends.
#[derive(Clone, Debug)]
pub struct Widths {
    config: Config,
    current: usize,
    started: bool,
    failed: bool,
}

impl Widths {
    /// Returns the width of the next group.
    pub(crate) fn next_width(&mut self) -> Result<usize> {
        match self.next() {
            Some(width) => width,
            None => Err(Error::InvalidConfiguration(
                "width schedule already failed".to_string(),
            )),
        }
    }
}

impl Iterator for Widths {
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(Ok(self.current));
        }
        if self.current < self.config.maximum_width {
            let grown = (self.config.growth)(self.current).min(self.config.maximum_width);
            if grown < 1 || grown < self.current {
                log::debug!("growth function mapped width {} to {}", self.current, grown);
                self.failed = true;
                return Some(Err(Error::InvalidConfiguration(format!(
                    "growth function mapped width {} to {}",
                    self.current, grown
                ))));
            }
            self.current = grown;
        }
        Some(Ok(self.current))
    }
}
