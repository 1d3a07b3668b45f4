//! # zencel
//!
//! Decoder for the palettized CEL and CL2 sprite formats of the original
//! Diablo, plus the level index files (MIN, TIL, SOL, DUN) that arrange
//! tile set frames into maps.
//!
//! ## Formats
//!
//! - **CEL**: single-image archive, a frame offset table followed by
//!   frames. Frames of level tile sets use one of six encodings (plain,
//!   run-length, left/right triangle, left/right trapezoid), none of which
//!   is tagged; [`classify`] infers it from the frame length and content.
//! - **CL2**: multi-image archive of eight embedded CEL containers whose
//!   frames all use the CL2 run-length encoding with solid fills.
//!
//! Frames carry no dimensions; they come from an [`AssetTable`] keyed by
//! asset name (the file stem). Unknown assets decode at 32x32 (CEL) or
//! 96x96 (CL2). Output is RGBA8, row-major, one buffer per frame.
//!
//! ## Non-Goals
//!
//! - Encoding
//! - Rendering or compositing decoded frames into maps
//! - Sniffing CEL vs CL2: the caller knows which one it has
//!
//! ## Usage
//!
//! ```no_run
//! use zencel::{DecodeRequest, Palette, Unstoppable};
//!
//! let pal: &[u8] = &[]; // levels/towndata/town.pal
//! let cel: &[u8] = &[]; // levels/towndata/town.cel
//!
//! let palette = Palette::from_bytes(pal)?;
//! let image = DecodeRequest::new(cel, "town").decode(&palette, Unstoppable)?;
//! for frame in image.iter() {
//!     println!("{}x{} {:?}", frame.width, frame.height, frame.scheme);
//! }
//! # Ok::<(), zencel::CelError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod assets;
mod classify;
mod decode;
mod error;
mod frame;
mod limits;
mod palette;

pub mod cel;
pub mod cl2;
pub mod level;

// Re-exports
pub use assets::{AssetInfo, AssetTable, DEFAULT_CEL_DIMENSIONS, DEFAULT_CL2_DIMENSIONS};
pub use classify::{
    Facing, FrameScheme, PLAIN_FRAME_LEN, TRAPEZOID_FRAME_LEN, TRIANGLE_FRAME_LEN, classify,
    probe_facing,
};
pub use decode::{
    DecodeRequest, DecodedArchive, DecodedImage, FrameErrorPolicy, FrameFailure, decode_image,
};
pub use enough::{Stop, Unstoppable};
pub use error::{CelError, FrameError};
pub use frame::{
    CL2_FRAME_HEADER, DecodedFrame, decode_cl2_frame, decode_frame, decode_left_trapezoid,
    decode_left_triangle, decode_plain, decode_right_trapezoid, decode_right_triangle,
    decode_run_length,
};
pub use limits::Limits;
pub use palette::{PALETTE_LEN, Palette, TRANSPARENT};
pub use rgb::RGBA8;

/// Decode a CEL file with the built-in asset table.
pub fn decode_cel(
    data: &[u8],
    asset: &str,
    palette: &Palette,
    stop: impl Stop,
) -> Result<DecodedImage, CelError> {
    DecodeRequest::new(data, asset).decode(palette, stop)
}

/// Decode a CL2 file with the built-in asset table.
pub fn decode_cl2(
    data: &[u8],
    asset: &str,
    palette: &Palette,
    stop: impl Stop,
) -> Result<DecodedArchive, CelError> {
    DecodeRequest::new(data, asset).decode_archive(palette, stop)
}
