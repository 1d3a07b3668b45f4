//! Frame encoding detection.
//!
//! CEL frames carry no type tag. Tile set frames are told apart by their
//! byte length and, for the two lengths shared by the left and right
//! facing layouts, by probing byte positions that the left or right layout
//! always stores as zero.

use crate::assets::AssetTable;

/// Byte length of a plain 32x32 frame.
pub const PLAIN_FRAME_LEN: usize = 0x400;
/// Byte length of a triangle frame.
pub const TRIANGLE_FRAME_LEN: usize = 0x220;
/// Byte length of a trapezoid frame.
pub const TRAPEZOID_FRAME_LEN: usize = 0x320;

/// Positions of the explicit transparent pixels of a left facing frame.
const LEFT_ZERO_POSITIONS: [usize; 16] = [
    0, 1, 8, 9, 24, 25, 48, 49, 80, 81, 120, 121, 168, 169, 224, 225,
];

/// Positions of the explicit transparent pixels of a right facing frame.
const RIGHT_ZERO_POSITIONS: [usize; 16] = [
    2, 3, 14, 15, 34, 35, 62, 63, 98, 99, 142, 143, 194, 195, 254, 255,
];

/// The encoding a frame was stored with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameScheme {
    /// One palette index per pixel, no transparency.
    Plain,
    /// Run-length runs of transparent or explicitly colored pixels.
    RunLength,
    /// 32x32 triangle anchored to the right edge (`<` shape).
    LeftTriangle,
    /// 32x32 triangle anchored to the left edge (`>` shape).
    RightTriangle,
    /// Left facing triangle over a solid lower half.
    LeftTrapezoid,
    /// Right facing triangle over a solid lower half.
    RightTrapezoid,
    /// CL2 run-length with solid color fills.
    Cl2,
}

impl FrameScheme {
    /// Numeric frame type as used by the community format notes (0..=6).
    pub const fn type_id(self) -> u8 {
        match self {
            Self::Plain => 0,
            Self::RunLength => 1,
            Self::LeftTriangle => 2,
            Self::RightTriangle => 3,
            Self::LeftTrapezoid => 4,
            Self::RightTrapezoid => 5,
            Self::Cl2 => 6,
        }
    }

    /// Inverse of [`FrameScheme::type_id`].
    pub const fn from_type_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => Self::Plain,
            1 => Self::RunLength,
            2 => Self::LeftTriangle,
            3 => Self::RightTriangle,
            4 => Self::LeftTrapezoid,
            5 => Self::RightTrapezoid,
            6 => Self::Cl2,
            _ => return None,
        })
    }
}

/// Result of probing a triangle or trapezoid frame for its facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
    /// Neither zero pattern matched. Decoded as right facing.
    Ambiguous,
}

/// Probe the implicit-zero byte positions of a 32x32 shaped frame.
///
/// The left pattern wins when both match.
pub fn probe_facing(frame: &[u8]) -> Facing {
    if all_zero(frame, &LEFT_ZERO_POSITIONS) {
        Facing::Left
    } else if all_zero(frame, &RIGHT_ZERO_POSITIONS) {
        Facing::Right
    } else {
        Facing::Ambiguous
    }
}

/// Pick the decoder for frame `index` of the CEL asset `asset`.
///
/// Only tile set assets are classified by shape; every other frame,
/// including frames of assets missing from `assets`, is run-length.
pub fn classify(assets: &AssetTable<'_>, asset: &str, index: usize, frame: &[u8]) -> FrameScheme {
    let Some(info) = assets.get(asset).filter(|info| info.tile_set) else {
        return FrameScheme::RunLength;
    };

    match frame.len() {
        PLAIN_FRAME_LEN if !info.is_plain_exception(index) => FrameScheme::Plain,
        TRIANGLE_FRAME_LEN => match facing(asset, index, frame) {
            Facing::Left => FrameScheme::LeftTriangle,
            Facing::Right | Facing::Ambiguous => FrameScheme::RightTriangle,
        },
        TRAPEZOID_FRAME_LEN => match facing(asset, index, frame) {
            Facing::Left => FrameScheme::LeftTrapezoid,
            Facing::Right | Facing::Ambiguous => FrameScheme::RightTrapezoid,
        },
        _ => FrameScheme::RunLength,
    }
}

fn facing(asset: &str, index: usize, frame: &[u8]) -> Facing {
    let facing = probe_facing(frame);
    if facing == Facing::Ambiguous {
        log::trace!("{asset} frame {index}: no zero pattern matched, decoding as right facing");
    }
    facing
}

fn all_zero(frame: &[u8], positions: &[usize]) -> bool {
    positions.iter().all(|&pos| frame.get(pos) == Some(&0))
}
