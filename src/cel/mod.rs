//! Single-image archive (CEL) container.
//!
//! Layout, all little-endian:
//!
//! ```text
//! u32            frame count N
//! u32 * (N + 1)  offsets; frame i spans offset[i]..offset[i + 1]
//! ...            frame data
//! ```
//!
//! Some assets prefix every frame with a header that is not pixel data;
//! its size comes from the asset table and is skipped here.

use alloc::vec::Vec;

use crate::error::CelError;

/// Read a little-endian u32 at `pos`.
pub(crate) fn read_u32_le(data: &[u8], pos: usize) -> Result<u32, CelError> {
    let bytes = pos
        .checked_add(4)
        .and_then(|end| data.get(pos..end))
        .ok_or(CelError::UnexpectedEof)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Number of frames declared by a CEL header.
pub fn frame_count(data: &[u8]) -> Result<usize, CelError> {
    Ok(read_u32_le(data, 0)? as usize)
}

/// Slice a CEL container into its frames, skipping `frame_header` bytes
/// at the start of each.
///
/// Frames borrow from `data` and keep their original order.
pub fn frames(data: &[u8], frame_header: usize) -> Result<Vec<&[u8]>, CelError> {
    let count = frame_count(data)?;
    let table_end = count
        .checked_add(2)
        .and_then(|entries| entries.checked_mul(4))
        .ok_or(CelError::UnexpectedEof)?;
    if table_end > data.len() {
        return Err(CelError::UnexpectedEof);
    }

    let mut frames = Vec::with_capacity(count);
    let mut start = read_u32_le(data, 4)? as usize;
    for index in 0..count {
        let end = read_u32_le(data, 4 * (index + 2))? as usize;
        let body = start.checked_add(frame_header).ok_or(CelError::UnexpectedEof)?;
        if body > end {
            return Err(CelError::InvalidHeader(alloc::format!(
                "frame {index} spans {start}..{end}, shorter than its {frame_header} byte header"
            )));
        }
        let frame = data.get(body..end).ok_or(CelError::UnexpectedEof)?;
        frames.push(frame);
        start = end;
    }

    log::trace!("CEL container: {count} frames, {} bytes", data.len());
    Ok(frames)
}
