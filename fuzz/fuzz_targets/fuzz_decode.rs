#![no_main]
use libfuzzer_sys::fuzz_target;
use zencel::{FrameErrorPolicy, Limits, Palette};

fuzz_target!(|data: &[u8]| {
    let palette = Palette::default();
    let limits = Limits {
        max_frames: Some(4096),
        max_memory_bytes: Some(64 * 1024 * 1024),
        ..Default::default()
    };

    // Containers: tile set, sprite and CL2 paths must never panic
    for asset in ["l1", "town", "objcurs"] {
        let _ = zencel::DecodeRequest::new(data, asset)
            .with_limits(&limits)
            .with_frame_policy(FrameErrorPolicy::Placeholder)
            .decode(&palette, enough::Unstoppable);
    }
    let _ = zencel::DecodeRequest::new(data, "bat")
        .with_limits(&limits)
        .decode_archive(&palette, enough::Unstoppable);

    // Level files
    let _ = zencel::level::Pillars::parse(data, 10);
    if let Ok(squares) = zencel::level::parse_til(data) {
        let _ = zencel::level::Dungeon::parse(data, &squares, (0, 0));
    }
});
