use alloc::vec::Vec;

use super::read_u16_le;
use crate::error::CelError;

const SQUARE_LEN: usize = 8;

/// Four pillar indices forming one diamond-shaped square.
///
/// ```text
///             top
///              /\
///     left    /\/\    right
///             \/\/
///              \/
///            bottom
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Square {
    pub top: u16,
    pub right: u16,
    pub left: u16,
    pub bottom: u16,
}

/// Parse a TIL file.
pub fn parse_til(data: &[u8]) -> Result<Vec<Square>, CelError> {
    if data.len() % SQUARE_LEN != 0 {
        return Err(CelError::InvalidData(alloc::format!(
            "TIL size {} is not a multiple of {SQUARE_LEN}",
            data.len()
        )));
    }

    data.chunks_exact(SQUARE_LEN)
        .map(|square| {
            Ok(Square {
                top: read_u16_le(square, 0)?,
                right: read_u16_le(square, 2)?,
                left: read_u16_le(square, 4)?,
                bottom: read_u16_le(square, 6)?,
            })
        })
        .collect()
}
