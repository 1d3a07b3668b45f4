//! Forward-only RGBA pixel cursor shared by every frame decoder.
//!
//! Pixels are appended, never addressed, so each output pixel is written
//! exactly once. The buffer is not pre-filled: a frame that stops early is
//! reported by [`PixelWriter::finish`] instead of leaving zeros behind.

use alloc::vec::Vec;

use rgb::RGBA8;

use crate::error::FrameError;
use crate::palette::{Palette, TRANSPARENT};

/// Upper bound on the bytes reserved before any pixel is written. Frame
/// sizes come from the caller, not the data, so larger buffers grow as
/// pixels arrive.
const MAX_RESERVE: usize = 1 << 20;

pub(crate) struct PixelWriter<'p> {
    out: Vec<u8>,
    written: usize,
    capacity: usize,
    palette: &'p Palette,
}

impl<'p> PixelWriter<'p> {
    pub(crate) fn new(width: u32, height: u32, palette: &'p Palette) -> Result<Self, FrameError> {
        let capacity = (width as usize)
            .checked_mul(height as usize)
            .ok_or(FrameError::DimensionsTooLarge { width, height })?;
        let bytes = capacity
            .checked_mul(4)
            .ok_or(FrameError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            out: Vec::with_capacity(bytes.min(MAX_RESERVE)),
            written: 0,
            capacity,
            palette,
        })
    }

    /// Reserve `count` pixels of the destination, failing on overrun.
    fn claim(&mut self, count: usize) -> Result<(), FrameError> {
        let needed = self.written + count;
        if needed > self.capacity {
            return Err(FrameError::Overrun {
                needed,
                capacity: self.capacity,
            });
        }
        self.written = needed;
        Ok(())
    }

    fn push(&mut self, color: RGBA8) {
        self.out.extend_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    pub(crate) fn transparent(&mut self, count: usize) -> Result<(), FrameError> {
        self.fill(TRANSPARENT, count)
    }

    /// One pixel per palette index.
    pub(crate) fn indices(&mut self, indices: &[u8]) -> Result<(), FrameError> {
        self.claim(indices.len())?;
        for &index in indices {
            let color = self.palette.get(index);
            self.push(color);
        }
        Ok(())
    }

    /// `count` pixels of a single palette color.
    pub(crate) fn repeat(&mut self, index: u8, count: usize) -> Result<(), FrameError> {
        let color = self.palette.get(index);
        self.fill(color, count)
    }

    fn fill(&mut self, color: RGBA8, count: usize) -> Result<(), FrameError> {
        self.claim(count)?;
        for _ in 0..count {
            self.push(color);
        }
        Ok(())
    }

    /// Hand back the pixel buffer once every pixel has been written.
    pub(crate) fn finish(self) -> Result<Vec<u8>, FrameError> {
        if self.written != self.capacity {
            return Err(FrameError::Underfill {
                written: self.written,
                expected: self.capacity,
            });
        }
        debug_assert_eq!(self.out.len(), self.capacity * 4);
        Ok(self.out)
    }
}

/// Byte cursor over one frame's data.
pub(crate) struct FrameReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn at(data: &'a [u8], pos: usize) -> Result<Self, FrameError> {
        if pos > data.len() {
            return Err(FrameError::Truncated { offset: data.len() });
        }
        Ok(Self { data, pos })
    }

    pub(crate) fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, FrameError> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or(FrameError::Truncated { offset: self.pos })?;
        self.pos += 1;
        Ok(b)
    }

    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FrameError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(FrameError::Truncated {
                offset: self.data.len(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_sequential_and_bounded() {
        let palette = Palette::default();
        let mut writer = PixelWriter::new(2, 2, &palette).unwrap();
        writer.indices(&[10]).unwrap();
        writer.transparent(1).unwrap();
        writer.repeat(20, 2).unwrap();
        assert_eq!(
            writer.transparent(1),
            Err(FrameError::Overrun {
                needed: 5,
                capacity: 4
            })
        );
        let pixels = writer.finish().unwrap();
        assert_eq!(
            pixels,
            [10u8, 10, 10, 255, 0, 0, 0, 0, 20, 20, 20, 255, 20, 20, 20, 255]
        );
    }

    #[test]
    fn rejected_run_writes_nothing() {
        let palette = Palette::default();
        let mut writer = PixelWriter::new(2, 1, &palette).unwrap();
        writer.indices(&[1]).unwrap();
        assert!(writer.indices(&[2, 3]).is_err());
        writer.indices(&[4]).unwrap();
        assert_eq!(writer.finish().unwrap(), [1u8, 1, 1, 255, 4, 4, 4, 255]);
    }

    #[test]
    fn short_frames_are_not_padded() {
        let palette = Palette::default();
        let mut writer = PixelWriter::new(4, 1, &palette).unwrap();
        writer.transparent(3).unwrap();
        assert_eq!(
            writer.finish(),
            Err(FrameError::Underfill {
                written: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn reader_reports_truncation() {
        let mut reader = FrameReader::new(&[1, 2, 3]);
        assert_eq!(reader.read_u8(), Ok(1));
        assert_eq!(reader.read_bytes(2), Ok(&[2u8, 3][..]));
        assert!(reader.eof());
        assert_eq!(reader.read_u8(), Err(FrameError::Truncated { offset: 3 }));
        assert!(FrameReader::at(&[0; 4], 5).is_err());
    }
}
