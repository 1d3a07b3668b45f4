//! Fixed-layout 32x32 tile frames: triangles and trapezoids.
//!
//! Each of the 32 rows stores a known number of bytes. A row's stored
//! bytes sit against one edge of the tile; the rest of the row is
//! transparent without being stored. On rows that carry an explicit zero
//! pair, the two stored bytes next to the transparent side are zeros and
//! are drawn transparent without a palette lookup.
//!
//! Rows are emitted in storage order, so tiles come out upside down
//! relative to how they are drawn in game.
//!
//! ```text
//! left triangle (rows 0..32)      right triangle
//! |                              ||                                |
//! |                          00xx||xx00                            |
//! |                          xxxx||xxxx                            |
//! |                      00xxxxxx||xxxxxx00                        |
//! |  ...                         ||  ...                           |
//! ```

use alloc::vec::Vec;

use super::writer::{FrameReader, PixelWriter};
use crate::classify::FrameScheme;
use crate::error::FrameError;
use crate::palette::Palette;

const TILE_SIZE: u32 = 32;
const ROW_LEN: usize = TILE_SIZE as usize;
const ZERO_PAIR: usize = 2;

/// Stored bytes per row of a triangle frame (0x220 bytes in total).
const TRIANGLE_ROWS: [u8; 32] = [
    0, 4, 4, 8, 8, 12, 12, 16, 16, 20, 20, 24, 24, 28, 28, 32, //
    32, 32, 28, 28, 24, 24, 20, 20, 16, 16, 12, 12, 8, 8, 4, 4,
];

/// Stored bytes per row of a trapezoid frame (0x320 bytes in total).
const TRAPEZOID_ROWS: [u8; 32] = [
    4, 4, 8, 8, 12, 12, 16, 16, 20, 20, 24, 24, 28, 28, 32, 32, //
    32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32,
];

/// Triangle rows alternate: odd rows carry the zero pair.
fn triangle_zeros(row: usize) -> usize {
    if row % 2 == 1 { ZERO_PAIR } else { 0 }
}

/// Trapezoid rows carry the zero pair on the even rows of the sloped half.
fn trapezoid_zeros(row: usize) -> usize {
    if row < 16 && row % 2 == 0 { ZERO_PAIR } else { 0 }
}

type LineDecoder = fn(&mut PixelWriter<'_>, &[u8], usize) -> Result<(), FrameError>;

/// Row anchored to the right edge: implicit transparency, zero pair, colors.
fn line_left(out: &mut PixelWriter<'_>, stored: &[u8], zeros: usize) -> Result<(), FrameError> {
    out.transparent(ROW_LEN - stored.len())?;
    out.transparent(zeros)?;
    out.indices(&stored[zeros..])
}

/// Row anchored to the left edge: colors, zero pair, implicit transparency.
fn line_right(out: &mut PixelWriter<'_>, stored: &[u8], zeros: usize) -> Result<(), FrameError> {
    let colored = stored.len() - zeros;
    out.indices(&stored[..colored])?;
    out.transparent(zeros)?;
    out.transparent(ROW_LEN - stored.len())
}

fn decode_tile(
    scheme: FrameScheme,
    frame: &[u8],
    (width, height): (u32, u32),
    palette: &Palette,
    rows: &[u8; 32],
    zeros: fn(usize) -> usize,
    line: LineDecoder,
) -> Result<Vec<u8>, FrameError> {
    if width != TILE_SIZE || height != TILE_SIZE {
        return Err(FrameError::UnsupportedDimensions {
            scheme,
            width,
            height,
        });
    }

    let mut out = PixelWriter::new(width, height, palette)?;
    let mut data = FrameReader::new(frame);
    for (row, &stored) in rows.iter().enumerate() {
        let stored = data.read_bytes(usize::from(stored))?;
        line(&mut out, stored, zeros(row))?;
    }

    if !data.eof() {
        return Err(FrameError::TrailingData {
            consumed: data.position(),
            len: frame.len(),
        });
    }
    out.finish()
}

/// Triangle anchored to the right edge of the tile.
pub fn decode_left_triangle(
    frame: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<Vec<u8>, FrameError> {
    decode_tile(
        FrameScheme::LeftTriangle,
        frame,
        (width, height),
        palette,
        &TRIANGLE_ROWS,
        triangle_zeros,
        line_left,
    )
}

/// Triangle anchored to the left edge of the tile.
pub fn decode_right_triangle(
    frame: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<Vec<u8>, FrameError> {
    decode_tile(
        FrameScheme::RightTriangle,
        frame,
        (width, height),
        palette,
        &TRIANGLE_ROWS,
        triangle_zeros,
        line_right,
    )
}

/// Left facing triangle whose lower half is solid.
pub fn decode_left_trapezoid(
    frame: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<Vec<u8>, FrameError> {
    decode_tile(
        FrameScheme::LeftTrapezoid,
        frame,
        (width, height),
        palette,
        &TRAPEZOID_ROWS,
        trapezoid_zeros,
        line_left,
    )
}

/// Right facing triangle whose lower half is solid.
pub fn decode_right_trapezoid(
    frame: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<Vec<u8>, FrameError> {
    decode_tile(
        FrameScheme::RightTrapezoid,
        frame,
        (width, height),
        palette,
        &TRAPEZOID_ROWS,
        trapezoid_zeros,
        line_right,
    )
}
