use alloc::vec;
use alloc::vec::Vec;

use super::read_u16_le;
use super::til::Square;
use crate::error::CelError;

/// A map piece from a DUN file, expanded to pillar indices.
///
/// DUN files store a grid of squares; each square covers 2x2 pillars, so
/// the pillar grid is twice as wide and tall as the stored grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    /// Where the piece is placed in the level, in pillar coordinates.
    pub start: (u32, u32),
    columns: usize,
    rows: usize,
    pillars: Vec<Option<u16>>,
}

impl Dungeon {
    /// Parse a DUN file against the level's TIL squares.
    ///
    /// Only the square layer is read; the monster and object layers that
    /// may follow it are ignored.
    pub fn parse(data: &[u8], squares: &[Square], start: (u32, u32)) -> Result<Self, CelError> {
        let square_columns = usize::from(read_u16_le(data, 0)?);
        let square_rows = usize::from(read_u16_le(data, 2)?);
        let columns = square_columns * 2;
        let rows = square_rows * 2;
        let needed = square_columns
            .checked_mul(square_rows)
            .and_then(|squares| squares.checked_mul(2))
            .and_then(|bytes| bytes.checked_add(4))
            .ok_or(CelError::UnexpectedEof)?;
        if data.len() < needed {
            return Err(CelError::UnexpectedEof);
        }
        let mut pillars = vec![None; columns * rows];

        let mut pos = 4;
        for square_row in 0..square_rows {
            for square_col in 0..square_columns {
                let square_plus_one = usize::from(read_u16_le(data, pos)?);
                pos += 2;
                if square_plus_one == 0 {
                    continue;
                }
                let square = squares.get(square_plus_one - 1).ok_or_else(|| {
                    CelError::InvalidData(alloc::format!(
                        "square {} out of range ({} squares)",
                        square_plus_one - 1,
                        squares.len()
                    ))
                })?;

                let (col, row) = (square_col * 2, square_row * 2);
                pillars[row * columns + col] = Some(square.top);
                pillars[row * columns + col + 1] = Some(square.right);
                pillars[(row + 1) * columns + col] = Some(square.left);
                pillars[(row + 1) * columns + col + 1] = Some(square.bottom);
            }
        }

        Ok(Self {
            start,
            columns,
            rows,
            pillars,
        })
    }

    /// Width in pillars.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Height in pillars.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pillar index at `(col, row)`; `None` for empty cells or outside the piece.
    pub fn pillar(&self, col: usize, row: usize) -> Option<u16> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        self.pillars[row * self.columns + col]
    }
}
