#![no_main]
use libfuzzer_sys::fuzz_target;
use zencel::{FrameScheme, Palette};

fuzz_target!(|input: (u8, u8, u8, &[u8])| {
    let (scheme, width, height, frame) = input;
    let Some(scheme) = FrameScheme::from_type_id(scheme % 7) else {
        return;
    };
    let palette = Palette::default();

    // Every decoder either fills the frame exactly or errors
    if let Ok(decoded) = zencel::decode_frame(scheme, frame, width.into(), height.into(), &palette) {
        assert_eq!(
            decoded.pixels().len(),
            usize::from(width) * usize::from(height) * 4
        );
    }
    let _ = zencel::classify(&zencel::AssetTable::DIABLO, "l2", 47, frame);
    let _ = zencel::probe_facing(frame);
});
