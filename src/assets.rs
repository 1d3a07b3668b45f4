//! Per-asset decode configuration.
//!
//! CEL and CL2 files carry no frame dimensions, and the tile set CELs mix
//! several frame encodings without tagging them. Everything the decoder
//! needs to know about a named asset lives in an [`AssetTable`], which is
//! plain immutable data handed to the decoder explicitly.

/// Everything known about one named asset.
///
/// The name is the file stem: `levels/towndata/town.cel` is `"town"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetInfo<'a> {
    pub name: &'a str,
    pub width: u32,
    pub height: u32,
    /// Bytes at the start of every frame that are not pixel data.
    pub frame_header: usize,
    /// Tile sets mix plain, triangle and trapezoid frames with run-length
    /// ones; only their frames go through shape classification.
    pub tile_set: bool,
    /// 1024-byte frames of a tile set that are run-length encoded anyway.
    pub plain_exceptions: &'a [usize],
    /// Blocks per pillar in the tile set's MIN file.
    pub pillar_blocks: Option<usize>,
}

impl<'a> AssetInfo<'a> {
    /// An ordinary sprite asset: fixed frame size, no classification.
    pub const fn sprite(name: &'a str, width: u32, height: u32) -> Self {
        Self {
            name,
            width,
            height,
            frame_header: 0,
            tile_set: false,
            plain_exceptions: &[],
            pillar_blocks: None,
        }
    }

    /// A 32x32 level tile set.
    pub const fn tile_set(name: &'a str, plain_exceptions: &'a [usize], pillar_blocks: usize) -> Self {
        Self {
            name,
            width: 32,
            height: 32,
            frame_header: 0,
            tile_set: true,
            plain_exceptions,
            pillar_blocks: Some(pillar_blocks),
        }
    }

    pub const fn with_frame_header(mut self, frame_header: usize) -> Self {
        self.frame_header = frame_header;
        self
    }

    /// Whether frame `index` is listed as run-length despite its plain size.
    pub fn is_plain_exception(&self, index: usize) -> bool {
        self.plain_exceptions.contains(&index)
    }
}

/// Lookup table from asset name to [`AssetInfo`], with fallbacks for
/// assets the table does not know.
#[derive(Clone, Copy, Debug)]
pub struct AssetTable<'a> {
    assets: &'a [AssetInfo<'a>],
    cel_default: (u32, u32),
    cl2_default: (u32, u32),
}

const L1_EXCEPTIONS: &[usize] = &[148, 159, 181, 186, 188];
const L2_EXCEPTIONS: &[usize] = &[47, 1397, 1399, 1411];
const L4_EXCEPTIONS: &[usize] = &[336, 639];
const TOWN_EXCEPTIONS: &[usize] = &[2328, 2367, 2593];

const DIABLO_ASSETS: &[AssetInfo<'static>] = &[
    AssetInfo::tile_set("l1", L1_EXCEPTIONS, 10),
    AssetInfo::tile_set("l2", L2_EXCEPTIONS, 10),
    AssetInfo::tile_set("l3", &[], 10),
    AssetInfo::tile_set("l4", L4_EXCEPTIONS, 16),
    AssetInfo::tile_set("town", TOWN_EXCEPTIONS, 16),
];

/// Frame size for CEL assets missing from the table.
pub const DEFAULT_CEL_DIMENSIONS: (u32, u32) = (32, 32);
/// Frame size for CL2 assets missing from the table.
pub const DEFAULT_CL2_DIMENSIONS: (u32, u32) = (96, 96);

impl<'a> AssetTable<'a> {
    /// The level tile sets of the original game.
    pub const DIABLO: AssetTable<'static> = AssetTable::new(DIABLO_ASSETS);

    /// Table over `assets`, with the stock fallback dimensions.
    pub const fn new(assets: &'a [AssetInfo<'a>]) -> Self {
        Self {
            assets,
            cel_default: DEFAULT_CEL_DIMENSIONS,
            cl2_default: DEFAULT_CL2_DIMENSIONS,
        }
    }

    pub const fn with_cel_default(mut self, width: u32, height: u32) -> Self {
        self.cel_default = (width, height);
        self
    }

    pub const fn with_cl2_default(mut self, width: u32, height: u32) -> Self {
        self.cl2_default = (width, height);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AssetInfo<'a>> {
        self.assets.iter().find(|info| info.name == name)
    }

    pub fn assets(&self) -> &'a [AssetInfo<'a>] {
        self.assets
    }

    /// Frame size of a single-image (CEL) asset.
    pub fn cel_dimensions(&self, name: &str) -> (u32, u32) {
        self.get(name)
            .map_or(self.cel_default, |info| (info.width, info.height))
    }

    /// Frame size of a multi-image (CL2) asset.
    pub fn cl2_dimensions(&self, name: &str) -> (u32, u32) {
        self.get(name)
            .map_or(self.cl2_default, |info| (info.width, info.height))
    }

    /// Per-frame header bytes to skip when slicing a CEL container.
    pub fn frame_header(&self, name: &str) -> usize {
        self.get(name).map_or(0, |info| info.frame_header)
    }
}

impl Default for AssetTable<'static> {
    fn default() -> Self {
        AssetTable::DIABLO
    }
}
