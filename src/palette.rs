use rgb::RGBA8;

use crate::error::CelError;

/// Number of entries in every palette.
pub const PALETTE_LEN: usize = 256;

/// Fully transparent black, used for every transparent pixel.
pub const TRANSPARENT: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

/// A 256-entry color table. Frame data stores indices into it.
///
/// Palette files carry no alpha; every loaded entry is opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [RGBA8; PALETTE_LEN],
}

impl Palette {
    /// Parse a raw palette: exactly 256 `(r, g, b)` byte triples.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CelError> {
        if data.len() != PALETTE_LEN * 3 {
            return Err(CelError::InvalidPalette { len: data.len() });
        }
        let mut colors = [TRANSPARENT; PALETTE_LEN];
        for (color, rgb) in colors.iter_mut().zip(data.chunks_exact(3)) {
            *color = RGBA8::new(rgb[0], rgb[1], rgb[2], 0xFF);
        }
        Ok(Self { colors })
    }

    /// Build a palette from already expanded colors.
    pub fn from_colors(colors: [RGBA8; PALETTE_LEN]) -> Self {
        Self { colors }
    }

    /// Color for a frame byte.
    #[inline]
    pub fn get(&self, index: u8) -> RGBA8 {
        self.colors[usize::from(index)]
    }

    pub fn colors(&self) -> &[RGBA8; PALETTE_LEN] {
        &self.colors
    }
}

impl Default for Palette {
    /// Opaque grayscale ramp, handy for inspecting frames without the game palette.
    fn default() -> Self {
        let mut colors = [TRANSPARENT; PALETTE_LEN];
        for (i, color) in colors.iter_mut().enumerate() {
            let v = i as u8;
            *color = RGBA8::new(v, v, v, 0xFF);
        }
        Self { colors }
    }
}
