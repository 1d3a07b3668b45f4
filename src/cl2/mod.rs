//! Multi-image archive (CL2) container.
//!
//! An archive starts with eight little-endian u32 offsets, one per image
//! (usually one per facing direction). Each offset points at a complete
//! CEL container laid out relative to its own start. The first offset is
//! always 32, right past the table, and doubles as the format's magic.

use alloc::vec::Vec;

use crate::cel;
use crate::error::CelError;

/// Images in every CL2 archive.
pub const ARCHIVE_IMAGE_COUNT: usize = 8;

/// First offset of every CL2 archive.
pub const ARCHIVE_MAGIC: u32 = (ARCHIVE_IMAGE_COUNT * 4) as u32;

/// Whether `data` starts like a CL2 archive.
pub fn is_archive(data: &[u8]) -> bool {
    cel::read_u32_le(data, 0).is_ok_and(|magic| magic == ARCHIVE_MAGIC)
}

/// Slice a CL2 archive into eight images of frames.
///
/// CL2 frames keep their own header; it is skipped by the frame decoder.
pub fn images(data: &[u8]) -> Result<Vec<Vec<&[u8]>>, CelError> {
    if cel::read_u32_le(data, 0)? != ARCHIVE_MAGIC {
        return Err(CelError::UnrecognizedFormat);
    }

    let mut images = Vec::with_capacity(ARCHIVE_IMAGE_COUNT);
    for image in 0..ARCHIVE_IMAGE_COUNT {
        let offset = cel::read_u32_le(data, image * 4)? as usize;
        let embedded = data.get(offset..).ok_or_else(|| {
            CelError::InvalidHeader(alloc::format!(
                "image {image} offset {offset} is past the end of the archive ({} bytes)",
                data.len()
            ))
        })?;
        images.push(cel::frames(embedded, 0)?);
    }
    Ok(images)
}
