//! Traits that allow writing/reading `GrowingVarInt` types on `bytes::{BufMut,Buf}`.

use crate::{raw, Config, Error, GrowingVarInt, Result};

use bytes::{Buf, BufMut};

// Frames up to this long are staged on the stack.
const STACK_FRAME_LEN: usize = 32;

/// Extension for `buf::BufMut` to write any `GrowingVarInt` type.
pub trait GrowingVarIntBufMut {
    /// Writes a `GrowingVarInt` value to the buffer and returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `OutOfSpace` without writing anything if the buffer cannot grow to hold the value.
    fn put_growing_varint<GV: GrowingVarInt>(&mut self, v: &GV, config: &Config) -> Result<usize>;
}

impl<Inner: BufMut> GrowingVarIntBufMut for Inner {
    #[inline]
    fn put_growing_varint<GV: GrowingVarInt>(&mut self, v: &GV, config: &Config) -> Result<usize> {
        let raw = v.to_growing_varint_raw();
        let len = config.magnitude_len(&raw)?;
        if self.remaining_mut() < len {
            return Err(Error::OutOfSpace {
                needed: len,
                available: self.remaining_mut(),
            });
        }
        if len <= STACK_FRAME_LEN {
            let mut frame = [0u8; STACK_FRAME_LEN];
            raw::encode(raw, config, &mut frame[..len])?;
            self.put_slice(&frame[..len]);
        } else {
            let mut frame = vec![0u8; len];
            raw::encode(raw, config, &mut frame)?;
            self.put_slice(&frame);
        }
        Ok(len)
    }
}

fn get_growing_varint_slow<B: Buf>(buf: &mut B, config: &Config) -> Result<Vec<u8>> {
    raw::read_frame(config, |group: &mut [u8]| {
        if group.len() > buf.remaining() {
            buf.advance(buf.remaining());
            Err(Error::UnexpectedEob)
        } else {
            buf.copy_to_slice(group);
            Ok(())
        }
    })
}

/// Extension for `buf::Buf` to read any `GrowingVarInt` type.
pub trait GrowingVarIntBuf {
    /// Reads a `GrowingVarInt` from the buffer. After a successful read, the
    /// buffer will be advanced by the number of bytes read.
    ///
    /// # Examples
    ///
    /// ```
    /// use growing_varint::{Config, GrowingVarIntBufMut, GrowingVarIntBuf};
    ///
    /// let config = Config::default();
    /// let to_encode: [u16; 3] = [1, 2, 400];
    /// let mut buf = vec![];
    /// for v in &to_encode {
    ///    buf.put_growing_varint(v, &config).unwrap();
    /// }
    ///
    /// let mut buf = &buf[..];
    /// for v in &to_encode {
    ///   let decoded = buf.get_growing_varint::<u16>(&config).unwrap();
    ///   assert_eq!(decoded, *v);
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an `UnexpectedEob` error if the buffer is empty or if the buffer
    /// ends before the value does. The rest of the buffer is consumed in that case.
    ///
    /// Returns an `Overflow` error if the encoded value is larger than the
    /// maximum value that can be represented by the `GrowingVarInt` type.
    fn get_growing_varint<GV: GrowingVarInt>(&mut self, config: &Config) -> Result<GV>;

    /// Returns an iterator over `GrowingVarInt` values in the buffer.
    ///
    /// The iterator ends when the buffer is exhausted or after the first error.
    ///
    /// # Examples
    ///
    /// ```
    /// use growing_varint::{Config, GrowingVarIntBufMut, GrowingVarIntBuf};
    ///
    /// let config = Config::growing();
    /// let to_encode: [i16; 4] = [1, 2, -30, -24_000];
    /// let mut buf = vec![];
    /// for n in to_encode.iter() {
    ///     buf.put_growing_varint(n, &config).unwrap();
    /// }
    /// let mut result = vec![];
    /// let mut decode_data = buf.as_slice();
    /// for decoded in decode_data.iter_growing_varint::<i16>(&config) {
    ///     result.push(decoded.unwrap());
    /// }
    /// assert_eq!(to_encode, result.as_slice());
    /// ```
    fn iter_growing_varint<GV: GrowingVarInt>(
        &mut self,
        config: &Config,
    ) -> GrowingVarIntIter<'_, Self, GV>
    where
        Self: Sized,
    {
        GrowingVarIntIter::new(self, *config)
    }
}

impl<Inner: Buf> GrowingVarIntBuf for Inner {
    fn get_growing_varint<GV: GrowingVarInt>(&mut self, config: &Config) -> Result<GV> {
        if !self.has_remaining() {
            return Err(Error::UnexpectedEob);
        }

        let raw = match raw::decode(self.chunk(), config) {
            Ok((raw, len)) => {
                self.advance(len);
                raw
            }
            Err(Error::UnexpectedEob) if self.chunk().len() < self.remaining() => {
                let frame = get_growing_varint_slow(self, config)?;
                raw::decode(&frame, config)?.0
            }
            Err(Error::UnexpectedEob) => {
                self.advance(self.remaining());
                return Err(Error::UnexpectedEob);
            }
            Err(e) => return Err(e),
        };
        GV::from_growing_varint_raw(raw).ok_or(Error::Overflow)
    }
}

/// An iterator over `GrowingVarInt` values in a `Buf`.
pub struct GrowingVarIntIter<'a, B, GV> {
    buf: &'a mut B,
    config: Config,
    done: bool,
    _marker: std::marker::PhantomData<GV>,
}

impl<'a, B, GV> GrowingVarIntIter<'a, B, GV> {
    /// Creates a new `GrowingVarIntIter`.
    pub fn new(buf: &'a mut B, config: Config) -> Self {
        Self {
            buf,
            config,
            done: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, B, GV> Iterator for GrowingVarIntIter<'a, B, GV>
where
    B: Buf,
    GV: GrowingVarInt,
{
    type Item = Result<GV>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.buf.has_remaining() {
            return None;
        }
        let item = self.buf.get_growing_varint(&self.config);
        self.done = item.is_err();
        Some(item)
    }
}
