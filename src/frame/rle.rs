//! Byte-stream schemes: plain, CEL run-length and CL2 run-length.

use alloc::vec::Vec;

use super::writer::{FrameReader, PixelWriter};
use crate::error::FrameError;
use crate::palette::Palette;

/// Bytes at the start of every CL2 frame that precede the pixel runs.
///
/// The header's contents are not interpreted.
pub const CL2_FRAME_HEADER: usize = 10;

/// Largest explicit color run in a CL2 frame. Longer runs are fills.
const CL2_MAX_EXPLICIT_RUN: usize = 65;

/// Plain frames: one palette index per pixel, in order.
pub fn decode_plain(
    frame: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<Vec<u8>, FrameError> {
    let mut out = PixelWriter::new(width, height, palette)?;
    out.indices(frame)?;
    out.finish()
}

/// CEL run-length frames.
///
/// A control byte with the high bit set is a run of `256 - c` transparent
/// pixels; otherwise `c` palette indices follow.
pub fn decode_run_length(
    frame: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<Vec<u8>, FrameError> {
    let mut out = PixelWriter::new(width, height, palette)?;
    let mut data = FrameReader::new(frame);

    while !data.eof() {
        let control = usize::from(data.read_u8()?);
        if control & 0x80 != 0 {
            out.transparent(256 - control)?;
        } else {
            out.indices(data.read_bytes(control)?)?;
        }
    }
    out.finish()
}

/// CL2 frames.
///
/// After the frame header: a control byte with the high bit clear is a run
/// of `c` transparent pixels. Otherwise `n = 256 - c`; up to 65 that many
/// palette indices follow, above it a single index follows and is repeated
/// `n - 65` times.
pub fn decode_cl2_frame(
    frame: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<Vec<u8>, FrameError> {
    let mut out = PixelWriter::new(width, height, palette)?;
    let mut data = FrameReader::at(frame, CL2_FRAME_HEADER)?;

    while !data.eof() {
        let control = usize::from(data.read_u8()?);
        if control & 0x80 == 0 {
            out.transparent(control)?;
            continue;
        }

        let run = 256 - control;
        if run <= CL2_MAX_EXPLICIT_RUN {
            out.indices(data.read_bytes(run)?)?;
        } else {
            let index = data.read_u8()?;
            out.repeat(index, run - CL2_MAX_EXPLICIT_RUN)?;
        }
    }
    out.finish()
}
