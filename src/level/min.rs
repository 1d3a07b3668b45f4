use alloc::vec::Vec;

use super::read_u16_le;
use crate::assets::AssetTable;
use crate::classify::FrameScheme;
use crate::error::CelError;

const BLOCK_LEN: usize = 2;

/// One non-empty block of a pillar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PillarBlock {
    /// Frame index into the tile set CEL.
    pub frame: usize,
    /// Frame type stored alongside the index.
    pub frame_type: u8,
}

impl PillarBlock {
    fn from_raw(raw: u16) -> Option<Self> {
        let frame_plus_one = usize::from(raw & 0x0FFF);
        if frame_plus_one == 0 {
            return None;
        }
        Some(Self {
            frame: frame_plus_one - 1,
            frame_type: ((raw & 0x7000) >> 12) as u8,
        })
    }

    /// The frame scheme named by the block's type field, if valid.
    pub fn scheme(&self) -> Option<FrameScheme> {
        FrameScheme::from_type_id(self.frame_type)
    }
}

/// Contents of a MIN file.
///
/// A pillar is two blocks wide; blocks are listed top to bottom, left
/// block first:
///
/// ```text
/// +----+----+
/// |  0 |  1 |
/// +----+----+
/// |  2 |  3 |
/// +----+----+
/// | .. | .. |
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pillars {
    blocks: Vec<Option<PillarBlock>>,
    blocks_per_pillar: usize,
}

impl Pillars {
    /// Parse a MIN file whose pillars are `blocks_per_pillar` blocks tall
    /// (10 or 16 in the original game).
    pub fn parse(data: &[u8], blocks_per_pillar: usize) -> Result<Self, CelError> {
        if blocks_per_pillar == 0 {
            return Err(CelError::InvalidData("pillars need at least one block".into()));
        }
        let stride = blocks_per_pillar * BLOCK_LEN;
        if data.len() % stride != 0 {
            return Err(CelError::InvalidData(alloc::format!(
                "MIN size {} is not a multiple of {stride}",
                data.len()
            )));
        }

        let blocks = (0..data.len() / BLOCK_LEN)
            .map(|i| read_u16_le(data, i * BLOCK_LEN).map(PillarBlock::from_raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            blocks,
            blocks_per_pillar,
        })
    }

    /// Parse the MIN file of a tile set, taking the pillar height from the
    /// asset table.
    pub fn parse_asset(data: &[u8], asset: &str, assets: &AssetTable<'_>) -> Result<Self, CelError> {
        let blocks_per_pillar = assets
            .get(asset)
            .and_then(|info| info.pillar_blocks)
            .ok_or_else(|| {
                CelError::InvalidData(alloc::format!("{asset} has no known pillar height"))
            })?;
        Self::parse(data, blocks_per_pillar)
    }

    pub fn len(&self) -> usize {
        self.blocks.len() / self.blocks_per_pillar
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks_per_pillar(&self) -> usize {
        self.blocks_per_pillar
    }

    /// Blocks of pillar `index`, top to bottom; `None` entries are empty.
    pub fn pillar(&self, index: usize) -> Option<&[Option<PillarBlock>]> {
        self.blocks
            .chunks_exact(self.blocks_per_pillar)
            .nth(index)
    }

    pub fn iter(&self) -> core::slice::ChunksExact<'_, Option<PillarBlock>> {
        self.blocks.chunks_exact(self.blocks_per_pillar)
    }
}
