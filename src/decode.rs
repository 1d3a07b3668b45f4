use alloc::vec::Vec;

use enough::Stop;

use crate::assets::AssetTable;
use crate::classify::{FrameScheme, classify};
use crate::error::{CelError, FrameError};
use crate::frame::{DecodedFrame, decode_frame};
use crate::limits::Limits;
use crate::palette::Palette;
use crate::{cel, cl2};

/// What to do when a single frame fails to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameErrorPolicy {
    /// Fail the whole image with [`CelError::Frame`].
    #[default]
    Abort,
    /// Substitute a fully transparent frame and record the failure in
    /// [`DecodedImage::failures`].
    Placeholder,
}

/// A frame that was replaced by a placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameFailure {
    pub index: usize,
    pub scheme: FrameScheme,
    pub error: FrameError,
}

/// Decoded frames of one CEL image, in file order.
#[derive(Clone, Debug, Default)]
pub struct DecodedImage {
    pub frames: Vec<DecodedFrame>,
    /// Frames that failed and were substituted. Always empty under
    /// [`FrameErrorPolicy::Abort`].
    pub failures: Vec<FrameFailure>,
}

impl DecodedImage {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&DecodedFrame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, DecodedFrame> {
        self.frames.iter()
    }
}

/// Decoded images of one CL2 archive, in archive order.
#[derive(Clone, Debug, Default)]
pub struct DecodedArchive {
    pub images: Vec<DecodedImage>,
}

impl DecodedArchive {
    /// Total number of frames across all images.
    pub fn frame_count(&self) -> usize {
        self.images.iter().map(DecodedImage::len).sum()
    }
}

/// Which container a frame came from; decides how it is classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Container {
    Cel,
    Cl2,
}

/// Decode request builder for one CEL or CL2 buffer.
///
/// ```no_run
/// use zencel::{DecodeRequest, FrameErrorPolicy, Palette, Unstoppable};
///
/// let pal: &[u8] = &[]; // town.pal
/// let cel: &[u8] = &[]; // town.cel
/// let palette = Palette::from_bytes(pal)?;
/// let image = DecodeRequest::new(cel, "town")
///     .with_frame_policy(FrameErrorPolicy::Placeholder)
///     .decode(&palette, Unstoppable)?;
/// println!("{} frames", image.len());
/// # Ok::<(), zencel::CelError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    asset: &'a str,
    assets: AssetTable<'a>,
    limits: Option<&'a Limits>,
    policy: FrameErrorPolicy,
}

impl<'a> DecodeRequest<'a> {
    /// Decode `data` as the asset named `asset` (the file stem, e.g. `"l1"`).
    pub fn new(data: &'a [u8], asset: &'a str) -> Self {
        Self {
            data,
            asset,
            assets: AssetTable::DIABLO,
            limits: None,
            policy: FrameErrorPolicy::Abort,
        }
    }

    /// Use a custom asset table instead of the built-in one.
    pub fn with_assets(mut self, assets: AssetTable<'a>) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_frame_policy(mut self, policy: FrameErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Decode as a single-image archive (CEL).
    pub fn decode(&self, palette: &Palette, stop: impl Stop) -> Result<DecodedImage, CelError> {
        let frames = cel::frames(self.data, self.assets.frame_header(self.asset))?;
        let (width, height) = self.assets.cel_dimensions(self.asset);
        self.check_limits(frames.len(), width, height)?;
        if self.assets.get(self.asset).is_none() {
            log::debug!("{}: not in the asset table, decoding at {width}x{height}", self.asset);
        }
        self.decode_frames(Container::Cel, &frames, (width, height), palette, &stop)
    }

    /// Decode as a multi-image archive (CL2).
    pub fn decode_archive(
        &self,
        palette: &Palette,
        stop: impl Stop,
    ) -> Result<DecodedArchive, CelError> {
        let images = cl2::images(self.data)?;
        let (width, height) = self.assets.cl2_dimensions(self.asset);
        let total = images.iter().map(Vec::len).sum();
        self.check_limits(total, width, height)?;
        if self.assets.get(self.asset).is_none() {
            log::debug!("{}: not in the asset table, decoding at {width}x{height}", self.asset);
        }

        let mut decoded = Vec::with_capacity(images.len());
        for frames in &images {
            stop.check()?;
            decoded.push(self.decode_frames(
                Container::Cl2,
                frames,
                (width, height),
                palette,
                &stop,
            )?);
        }
        log::debug!("{}: decoded {total} frames in {} images", self.asset, decoded.len());
        Ok(DecodedArchive { images: decoded })
    }

    fn check_limits(&self, frames: usize, width: u32, height: u32) -> Result<(), CelError> {
        let Some(limits) = self.limits else {
            return Ok(());
        };
        limits.check(width, height)?;
        limits.check_frames(frames)?;
        let out_bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .and_then(|bytes| bytes.checked_mul(frames))
            .ok_or(CelError::DimensionsTooLarge { width, height })?;
        limits.check_memory(out_bytes)
    }

    fn decode_frames(
        &self,
        container: Container,
        frames: &[&[u8]],
        (width, height): (u32, u32),
        palette: &Palette,
        stop: &dyn Stop,
    ) -> Result<DecodedImage, CelError> {
        let mut image = DecodedImage {
            frames: Vec::with_capacity(frames.len()),
            failures: Vec::new(),
        };

        for (index, frame) in frames.iter().enumerate() {
            stop.check()?;
            let scheme = match container {
                Container::Cel => classify(&self.assets, self.asset, index, frame),
                Container::Cl2 => FrameScheme::Cl2,
            };
            log::trace!(
                "{} frame {index}: {} bytes, {scheme:?}",
                self.asset,
                frame.len()
            );

            match decode_frame(scheme, frame, width, height, palette) {
                Ok(decoded) => image.frames.push(decoded),
                Err(source) if self.policy == FrameErrorPolicy::Abort => {
                    return Err(CelError::Frame {
                        index,
                        scheme,
                        source,
                    });
                }
                Err(error) => {
                    let Some(placeholder) = DecodedFrame::placeholder(width, height, scheme)
                    else {
                        return Err(CelError::Frame {
                            index,
                            scheme,
                            source: error,
                        });
                    };
                    log::warn!(
                        "{} frame {index} ({scheme:?}) replaced by placeholder: {error}",
                        self.asset
                    );
                    image.frames.push(placeholder);
                    image.failures.push(FrameFailure {
                        index,
                        scheme,
                        error,
                    });
                }
            }
        }
        Ok(image)
    }
}

/// Decode already sliced CEL frames of the asset `asset`.
///
/// Frames are classified and decoded in order; the first failing frame
/// aborts with [`CelError::Frame`].
pub fn decode_image(
    frames: &[&[u8]],
    asset: &str,
    palette: &Palette,
    assets: &AssetTable<'_>,
) -> Result<DecodedImage, CelError> {
    let request = DecodeRequest {
        data: &[],
        asset,
        assets: *assets,
        limits: None,
        policy: FrameErrorPolicy::Abort,
    };
    let size = assets.cel_dimensions(asset);
    request.decode_frames(Container::Cel, frames, size, palette, &enough::Unstoppable)
}
