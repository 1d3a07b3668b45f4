//! Level index files that arrange tile set frames into maps.
//!
//! - MIN: pillars, vertical stacks of tile set frames.
//! - TIL: squares, four pillars arranged as a diamond.
//! - SOL: per-pillar collision and transparency flags.
//! - DUN: map pieces, a grid of squares.
//!
//! All are fixed-layout little-endian tables; lengths that are not a
//! multiple of the record size are rejected.

mod dun;
mod min;
mod sol;
mod til;

pub use dun::Dungeon;
pub use min::{PillarBlock, Pillars};
pub use sol::{PillarFlags, parse_sol};
pub use til::{Square, parse_til};

use crate::error::CelError;

fn read_u16_le(data: &[u8], pos: usize) -> Result<u16, CelError> {
    let bytes = data.get(pos..pos + 2).ok_or(CelError::UnexpectedEof)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}
