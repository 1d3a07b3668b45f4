//! CEL/CL2 containers and whole-image decoding.

use std::sync::atomic::{AtomicUsize, Ordering};

use enough::{StopReason, Unstoppable};
use zencel::*;

fn gray_palette() -> Palette {
    Palette::default()
}

/// Build a CEL container around `frames`.
fn cel_container(frames: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(frames.len() as u32).to_le_bytes());
    let mut offset = 4 * (frames.len() + 2);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    for frame in frames {
        offset += frame.len();
        out.extend_from_slice(&(offset as u32).to_le_bytes());
    }
    for frame in frames {
        out.extend_from_slice(frame);
    }
    out
}

/// Build a CL2 archive around eight CEL containers.
fn cl2_archive(images: &[Vec<u8>; 8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut offset = 32;
    for image in images {
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += image.len();
    }
    for image in images {
        out.extend_from_slice(image);
    }
    out
}

/// 32x32 run-length frame: `first` colored pixels of index 7, rest transparent.
fn run_length_frame(first: u8) -> Vec<u8> {
    assert!(first <= 127);
    let mut frame = vec![first];
    frame.extend(std::iter::repeat_n(7u8, usize::from(first)));
    let mut remaining = 1024 - usize::from(first);
    while remaining > 0 {
        let run = remaining.min(128);
        frame.push((256 - run) as u8);
        remaining -= run;
    }
    frame
}

fn triangle_frame(left: bool) -> Vec<u8> {
    let mut frame = vec![5u8; TRIANGLE_FRAME_LEN];
    let zeros: &[usize] = if left {
        &[0, 1, 8, 9, 24, 25, 48, 49, 80, 81, 120, 121, 168, 169, 224, 225]
    } else {
        &[2, 3, 14, 15, 34, 35, 62, 63, 98, 99, 142, 143, 194, 195, 254, 255]
    };
    for &pos in zeros {
        frame[pos] = 0;
    }
    frame
}

// ── CEL container ────────────────────────────────────────────────────

#[test]
fn cel_frames_keep_order() {
    let a = [1u8, 2, 3];
    let b = [4u8];
    let c: [u8; 0] = [];
    let data = cel_container(&[&a, &b, &c]);
    assert_eq!(cel::frame_count(&data).unwrap(), 3);
    let frames = cel::frames(&data, 0).unwrap();
    assert_eq!(frames, vec![&a[..], &b[..], &c[..]]);
}

#[test]
fn cel_frame_header_is_skipped() {
    let a = [0xAAu8, 0xAA, 1, 2];
    let b = [0xAAu8, 0xAA, 3];
    let data = cel_container(&[&a, &b]);
    let frames = cel::frames(&data, 2).unwrap();
    assert_eq!(frames, vec![&[1u8, 2][..], &[3u8][..]]);

    assert!(matches!(
        cel::frames(&data, 4),
        Err(CelError::InvalidHeader(_))
    ));
}

#[test]
fn cel_structural_errors() {
    assert!(matches!(cel::frames(&[1, 0], 0), Err(CelError::UnexpectedEof)));

    // Two frames declared, offset table cut short.
    let mut short = 2u32.to_le_bytes().to_vec();
    short.extend_from_slice(&16u32.to_le_bytes());
    assert!(matches!(cel::frames(&short, 0), Err(CelError::UnexpectedEof)));

    // End offset past the buffer.
    let mut past_end = cel_container(&[&[1, 2, 3]]);
    past_end[8..12].copy_from_slice(&100u32.to_le_bytes());
    assert!(matches!(cel::frames(&past_end, 0), Err(CelError::UnexpectedEof)));

    // Huge frame count does not allocate.
    let huge = u32::MAX.to_le_bytes();
    assert!(matches!(cel::frames(&huge, 0), Err(CelError::UnexpectedEof)));
}

// ── CEL decoding ─────────────────────────────────────────────────────

#[test]
fn tile_set_frames_are_classified_per_frame() {
    let plain = vec![3u8; PLAIN_FRAME_LEN];
    let rle = run_length_frame(10);
    let left = triangle_frame(true);
    let right = triangle_frame(false);
    let data = cel_container(&[&plain, &rle, &left, &right]);

    let image = decode_cel(&data, "l3", &gray_palette(), Unstoppable).unwrap();
    assert_eq!(image.len(), 4);
    let schemes: Vec<_> = image.iter().map(|f| f.scheme).collect();
    assert_eq!(
        schemes,
        [
            FrameScheme::Plain,
            FrameScheme::RunLength,
            FrameScheme::LeftTriangle,
            FrameScheme::RightTriangle
        ]
    );
    assert!(image.failures.is_empty());
    for frame in image.iter() {
        assert_eq!((frame.width, frame.height), (32, 32));
        assert_eq!(frame.pixels().len(), 32 * 32 * 4);
    }
    assert_eq!(image.frame(0).unwrap().pixel(5, 5), Some(RGBA8::new(3, 3, 3, 255)));
    assert_eq!(image.frame(1).unwrap().pixel(9, 0), Some(RGBA8::new(7, 7, 7, 255)));
    assert_eq!(image.frame(1).unwrap().pixel(10, 0), Some(TRANSPARENT));
}

#[test]
fn listed_plain_sized_frame_is_run_length() {
    // A 1024-byte frame that happens to be valid run-length data.
    let mut odd = vec![0x7Fu8];
    odd.extend(std::iter::repeat_n(1u8, 127));
    odd.extend([0x80; 7]);
    odd.push(0xFF);
    // Trailing zero controls write nothing.
    odd.resize(PLAIN_FRAME_LEN, 0);

    let mut frames: Vec<Vec<u8>> = (0..=336).map(|_| run_length_frame(1)).collect();
    frames[336] = odd;
    let refs: Vec<&[u8]> = frames.iter().map(Vec::as_slice).collect();
    let data = cel_container(&refs);

    let image = decode_cel(&data, "l4", &gray_palette(), Unstoppable).unwrap();
    assert_eq!(image.frame(336).unwrap().scheme, FrameScheme::RunLength);

    // The same bytes at an unlisted index are plain.
    let image = decode_image(&refs[335..], "l4", &gray_palette(), &AssetTable::DIABLO).unwrap();
    assert_eq!(image.frame(1).unwrap().scheme, FrameScheme::Plain);
}

#[test]
fn unknown_assets_decode_as_run_length_32x32() {
    let plain_sized = vec![0u8; PLAIN_FRAME_LEN];
    let data = cel_container(&[&[0x80; 8], &plain_sized]);

    let result = decode_cel(&data, "objcurs", &gray_palette(), Unstoppable);
    // 1024 zero controls write no pixels at all.
    match result {
        Err(CelError::Frame {
            index: 1,
            scheme: FrameScheme::RunLength,
            source: FrameError::Underfill { written: 0, .. },
        }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn frame_errors_abort_by_default() {
    let good = run_length_frame(3);
    let bad = [0x05u8, 1, 2];
    let data = cel_container(&[&good, &bad, &good]);

    let err = DecodeRequest::new(&data, "town")
        .decode(&gray_palette(), Unstoppable)
        .unwrap_err();
    match err {
        CelError::Frame {
            index,
            scheme,
            source,
        } => {
            assert_eq!(index, 1);
            assert_eq!(scheme, FrameScheme::RunLength);
            assert!(matches!(source, FrameError::Truncated { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn placeholder_policy_keeps_frame_positions() {
    let good = run_length_frame(3);
    let bad = [0x05u8, 1, 2];
    let data = cel_container(&[&good, &bad, &good]);

    let image = DecodeRequest::new(&data, "town")
        .with_frame_policy(FrameErrorPolicy::Placeholder)
        .decode(&gray_palette(), Unstoppable)
        .unwrap();
    assert_eq!(image.len(), 3);
    assert_eq!(image.failures.len(), 1);
    assert_eq!(image.failures[0].index, 1);
    assert_eq!(image.failures[0].scheme, FrameScheme::RunLength);
    assert!(image.frame(1).unwrap().pixels().iter().all(|&b| b == 0));
    assert_eq!(image.frame(1).unwrap().pixels().len(), 32 * 32 * 4);
    assert_eq!(image.frame(2).unwrap().pixel(2, 0), Some(RGBA8::new(7, 7, 7, 255)));
}

#[test]
fn placeholder_policy_with_oversized_frames_reports_the_frame() {
    const ASSETS: &[AssetInfo<'static>] = &[AssetInfo::sprite("big", u32::MAX, u32::MAX)];
    let data = cel_container(&[&[0x05, 1, 2]]);

    let err = DecodeRequest::new(&data, "big")
        .with_assets(AssetTable::new(ASSETS))
        .with_frame_policy(FrameErrorPolicy::Placeholder)
        .decode(&gray_palette(), Unstoppable)
        .unwrap_err();
    assert!(matches!(
        err,
        CelError::Frame {
            index: 0,
            scheme: FrameScheme::RunLength,
            ..
        }
    ));
}

/// Lets `remaining` checks pass, then cancels.
struct StopAfter {
    remaining: AtomicUsize,
}

impl StopAfter {
    fn new(checks: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl Stop for StopAfter {
    fn check(&self) -> Result<(), StopReason> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| StopReason::Cancelled)
    }
}

#[test]
fn cancellation_stops_image_decoding() {
    let frame = run_length_frame(2);
    let data = cel_container(&[&frame, &frame, &frame]);
    let palette = gray_palette();

    for checks in 0..3 {
        let result = DecodeRequest::new(&data, "l1").decode(&palette, StopAfter::new(checks));
        assert!(
            matches!(result, Err(CelError::Cancelled(_))),
            "{checks}: {result:?}"
        );
    }
    let image = DecodeRequest::new(&data, "l1")
        .decode(&palette, StopAfter::new(3))
        .unwrap();
    assert_eq!(image.len(), 3);
}

#[test]
fn cancellation_stops_archive_decoding() {
    const ASSETS: &[AssetInfo<'static>] = &[AssetInfo::sprite("bat", 4, 2)];
    let image = cel_container(&[&small_cl2_frame(1)]);
    let images: [Vec<u8>; 8] = core::array::from_fn(|_| image.clone());
    let data = cl2_archive(&images);
    let palette = gray_palette();
    let request = DecodeRequest::new(&data, "bat").with_assets(AssetTable::new(ASSETS));

    // One check per image and one per frame.
    for checks in [0, 1, 5, 15] {
        let result = request.decode_archive(&palette, StopAfter::new(checks));
        assert!(
            matches!(result, Err(CelError::Cancelled(_))),
            "{checks}: {result:?}"
        );
    }
    let archive = request.decode_archive(&palette, StopAfter::new(16)).unwrap();
    assert_eq!(archive.frame_count(), 8);
}

#[test]
fn custom_asset_table() {
    const ASSETS: &[AssetInfo<'static>] = &[AssetInfo::sprite("cursor", 4, 2).with_frame_header(3)];
    let table = AssetTable::new(ASSETS);

    let frame = [9u8, 9, 9, 0xFC, 0x04, 1, 2, 3, 4];
    let data = cel_container(&[&frame]);
    let image = DecodeRequest::new(&data, "cursor")
        .with_assets(table)
        .decode(&gray_palette(), Unstoppable)
        .unwrap();
    let frame = image.frame(0).unwrap();
    assert_eq!((frame.width, frame.height), (4, 2));
    assert_eq!(frame.pixel(3, 0), Some(TRANSPARENT));
    assert_eq!(frame.pixel(0, 1), Some(RGBA8::new(1, 1, 1, 255)));
}

#[test]
fn limits_are_checked_before_decoding() {
    let frame = run_length_frame(1);
    let data = cel_container(&[&frame, &frame, &frame]);
    let palette = gray_palette();

    let limits = Limits {
        max_frames: Some(2),
        ..Default::default()
    };
    let result = DecodeRequest::new(&data, "l1")
        .with_limits(&limits)
        .decode(&palette, Unstoppable);
    assert!(matches!(result, Err(CelError::LimitExceeded(_))));

    let limits = Limits {
        max_memory_bytes: Some(3 * 32 * 32 * 4 - 1),
        ..Default::default()
    };
    let result = DecodeRequest::new(&data, "l1")
        .with_limits(&limits)
        .decode(&palette, Unstoppable);
    assert!(matches!(result, Err(CelError::LimitExceeded(_))));

    let limits = Limits {
        max_width: Some(16),
        ..Default::default()
    };
    let result = DecodeRequest::new(&data, "l1")
        .with_limits(&limits)
        .decode(&palette, Unstoppable);
    assert!(matches!(result, Err(CelError::LimitExceeded(_))));

    let limits = Limits {
        max_frames: Some(3),
        max_pixels: Some(1024),
        max_memory_bytes: Some(3 * 32 * 32 * 4),
        ..Default::default()
    };
    let image = DecodeRequest::new(&data, "l1")
        .with_limits(&limits)
        .decode(&palette, Unstoppable)
        .unwrap();
    assert_eq!(image.len(), 3);
}

// ── CL2 ──────────────────────────────────────────────────────────────

/// 4x2 CL2 frame: two transparent, two explicit, four filled.
fn small_cl2_frame(fill: u8) -> Vec<u8> {
    let mut frame = vec![0u8; CL2_FRAME_HEADER];
    frame.extend_from_slice(&[0x02, 0xFE, 10, 11, 0xBB, fill]);
    frame
}

#[test]
fn cl2_archive_decodes_every_image() {
    const ASSETS: &[AssetInfo<'static>] = &[AssetInfo::sprite("bat", 4, 2)];
    let images: [Vec<u8>; 8] = core::array::from_fn(|i| {
        let frames: Vec<Vec<u8>> = (0..=i).map(|j| small_cl2_frame(j as u8)).collect();
        let refs: Vec<&[u8]> = frames.iter().map(Vec::as_slice).collect();
        cel_container(&refs)
    });
    let data = cl2_archive(&images);
    assert!(cl2::is_archive(&data));

    let archive = DecodeRequest::new(&data, "bat")
        .with_assets(AssetTable::new(ASSETS))
        .decode_archive(&gray_palette(), Unstoppable)
        .unwrap();
    assert_eq!(archive.images.len(), 8);
    assert_eq!(archive.frame_count(), 36);
    for (i, image) in archive.images.iter().enumerate() {
        assert_eq!(image.len(), i + 1);
        for (j, frame) in image.iter().enumerate() {
            assert_eq!(frame.scheme, FrameScheme::Cl2);
            assert_eq!(frame.pixel(1, 0), Some(TRANSPARENT));
            assert_eq!(frame.pixel(2, 0), Some(RGBA8::new(10, 10, 10, 255)));
            let fill = j as u8;
            assert_eq!(frame.pixel(3, 1), Some(RGBA8::new(fill, fill, fill, 255)));
        }
    }
}

#[test]
fn cl2_unknown_asset_defaults_to_96() {
    let mut frame = vec![0u8; CL2_FRAME_HEADER];
    // 96 * 96 = 9216 = 72 * 127 + 72
    frame.extend(std::iter::repeat_n(0x7Fu8, 72));
    frame.push(72);
    let image = cel_container(&[&frame]);
    let images: [Vec<u8>; 8] = core::array::from_fn(|_| image.clone());
    let data = cl2_archive(&images);

    let archive = decode_cl2(&data, "warrior", &gray_palette(), Unstoppable).unwrap();
    let frame = archive.images[7].frame(0).unwrap();
    assert_eq!((frame.width, frame.height), (96, 96));
    assert!(frame.as_rgba().iter().all(|&px| px == TRANSPARENT));
}

#[test]
fn cl2_structural_errors() {
    let palette = gray_palette();
    let mut data = vec![0u8; 64];
    data[..4].copy_from_slice(&31u32.to_le_bytes());
    assert!(!cl2::is_archive(&data));
    assert!(matches!(
        decode_cl2(&data, "bat", &palette, Unstoppable),
        Err(CelError::UnrecognizedFormat)
    ));

    assert!(matches!(cl2::images(&[32, 0]), Err(CelError::UnexpectedEof)));

    // Image offset past the end.
    let mut data = 32u32.to_le_bytes().to_vec();
    data.extend_from_slice(&1000u32.to_le_bytes());
    data.resize(40, 0);
    assert!(matches!(cl2::images(&data), Err(CelError::InvalidHeader(_))));
}

#[test]
fn cl2_frame_errors_carry_index() {
    const ASSETS: &[AssetInfo<'static>] = &[AssetInfo::sprite("bat", 4, 2)];
    let mut broken = small_cl2_frame(1);
    broken.pop();
    let good = small_cl2_frame(1);
    let image = cel_container(&[&good, &broken]);
    let images: [Vec<u8>; 8] = core::array::from_fn(|_| image.clone());
    let data = cl2_archive(&images);

    let err = DecodeRequest::new(&data, "bat")
        .with_assets(AssetTable::new(ASSETS))
        .decode_archive(&gray_palette(), Unstoppable)
        .unwrap_err();
    assert!(matches!(
        err,
        CelError::Frame {
            index: 1,
            scheme: FrameScheme::Cl2,
            source: FrameError::Truncated { .. }
        }
    ));
}

// ── Palette ──────────────────────────────────────────────────────────

#[test]
fn palette_requires_256_triples() {
    assert!(matches!(
        Palette::from_bytes(&[0u8; 767]),
        Err(CelError::InvalidPalette { len: 767 })
    ));
    let mut raw = vec![0u8; 768];
    raw[3..6].copy_from_slice(&[1, 2, 3]);
    let palette = Palette::from_bytes(&raw).unwrap();
    assert_eq!(palette.get(1), RGBA8::new(1, 2, 3, 255));
    assert!(palette.colors().iter().all(|c| c.a == 255));
}
