use alloc::string::String;
use enough::StopReason;

use crate::classify::FrameScheme;

/// Errors from a single frame's byte stream.
///
/// A frame error never leaves a partially written pixel buffer behind: the
/// decoder that raised it returns no pixels at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FrameError {
    #[error("frame data ends at byte {offset} in the middle of a run")]
    Truncated { offset: usize },

    #[error("run needs {needed} pixels but the frame holds {capacity}")]
    Overrun { needed: usize, capacity: usize },

    #[error("frame data produced {written} of {expected} pixels")]
    Underfill { written: usize, expected: usize },

    #[error("layout covers {consumed} bytes but the frame has {len}")]
    TrailingData { consumed: usize, len: usize },

    #[error("{scheme:?} frames are 32x32, not {width}x{height}")]
    UnsupportedDimensions {
        scheme: FrameScheme,
        width: u32,
        height: u32,
    },

    #[error("frame dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },
}

/// Errors from CEL/CL2 and level file decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CelError {
    #[error("unrecognized archive magic")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("palette must be 768 bytes, got {len}")]
    InvalidPalette { len: usize },

    #[error("frame {index} ({scheme:?}): {source}")]
    Frame {
        index: usize,
        scheme: FrameScheme,
        #[source]
        source: FrameError,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for CelError {
    fn from(r: StopReason) -> Self {
        CelError::Cancelled(r)
    }
}
