//! Frame decoders, one per [`FrameScheme`].
//!
//! Every decoder is a pure function of the frame bytes, the frame size and
//! the palette, and produces `width * height` RGBA8 pixels in row-major
//! order, or a [`FrameError`] and no pixels at all.

mod rle;
mod tile;
mod writer;

pub use rle::{CL2_FRAME_HEADER, decode_cl2_frame, decode_plain, decode_run_length};
pub use tile::{
    decode_left_trapezoid, decode_left_triangle, decode_right_trapezoid, decode_right_triangle,
};

use alloc::vec;
use alloc::vec::Vec;

use rgb::{AsPixels as _, RGBA8};

use crate::classify::FrameScheme;
use crate::error::FrameError;
use crate::palette::Palette;

/// One decoded frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedFrame {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// The scheme the frame was decoded with.
    pub scheme: FrameScheme,
}

impl DecodedFrame {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32, scheme: FrameScheme) -> Self {
        Self {
            pixels,
            width,
            height,
            scheme,
        }
    }

    /// Fully transparent stand-in for a frame that failed to decode, or
    /// `None` if the frame size does not fit in memory.
    pub(crate) fn placeholder(width: u32, height: u32, scheme: FrameScheme) -> Option<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        Some(Self::new(vec![0u8; len], width, height, scheme))
    }

    /// RGBA8 bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The pixel data as typed RGBA8 pixels.
    pub fn as_rgba(&self) -> &[RGBA8] {
        self.pixels.as_pixels()
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.as_rgba().get(idx).copied()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGBA8> {
        imgref::ImgRef::new(self.as_rgba(), self.width as usize, self.height as usize)
    }

    /// Copy into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<RGBA8> {
        imgref::ImgVec::new(
            self.as_rgba().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Decode one frame with the given scheme.
pub fn decode_frame(
    scheme: FrameScheme,
    frame: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<DecodedFrame, FrameError> {
    let decode = match scheme {
        FrameScheme::Plain => decode_plain,
        FrameScheme::RunLength => decode_run_length,
        FrameScheme::LeftTriangle => decode_left_triangle,
        FrameScheme::RightTriangle => decode_right_triangle,
        FrameScheme::LeftTrapezoid => decode_left_trapezoid,
        FrameScheme::RightTrapezoid => decode_right_trapezoid,
        FrameScheme::Cl2 => decode_cl2_frame,
    };
    let pixels = decode(frame, width, height, palette)?;
    Ok(DecodedFrame::new(pixels, width, height, scheme))
}
