/// Resource limits for image and archive decoding.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count per frame (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum number of frames in one image (or across one archive).
    pub max_frames: Option<u64>,
    /// Maximum memory bytes for all decoded frames of one call.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check frame dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::CelError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::CelError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::CelError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::CelError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check a frame count against limits.
    pub(crate) fn check_frames(&self, frames: usize) -> Result<(), crate::CelError> {
        if let Some(max_frames) = self.max_frames {
            if frames as u64 > max_frames {
                return Err(crate::CelError::LimitExceeded(alloc::format!(
                    "frame count {frames} exceeds limit {max_frames}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), crate::CelError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(crate::CelError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
