#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn cel(frames: &[&[u8]]) -> Vec<u8> {
    let mut out = (frames.len() as u32).to_le_bytes().to_vec();
    let mut offset = 4 * (frames.len() as u32 + 2);
    out.extend_from_slice(&offset.to_le_bytes());
    for frame in frames {
        offset += frame.len() as u32;
        out.extend_from_slice(&offset.to_le_bytes());
    }
    for frame in frames {
        out.extend_from_slice(frame);
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Plain 32x32
    let plain = vec![0x42u8; 1024];
    fs::write(format!("{dir}/plain.cel"), cel(&[&plain])).unwrap();

    // Run-length 32x32: 16 colored, rest transparent
    let mut rle = vec![16u8];
    rle.extend(1..=16u8);
    rle.extend([0x80; 7]);
    rle.push(0x90);
    fs::write(format!("{dir}/rle.cel"), cel(&[&rle])).unwrap();

    // Left triangle
    let mut tri = vec![9u8; 544];
    for pos in [0, 1, 8, 9, 24, 25, 48, 49, 80, 81, 120, 121, 168, 169, 224, 225] {
        tri[pos] = 0;
    }
    fs::write(format!("{dir}/triangle.cel"), cel(&[&tri, &rle])).unwrap();

    // CL2 archive, eight single-frame images of 96x96 transparent
    let mut frame = vec![0u8; 10];
    frame.extend([0x7F; 72]);
    frame.push(72);
    let image = cel(&[&frame]);
    let mut cl2 = Vec::new();
    for i in 0..8u32 {
        cl2.extend_from_slice(&(32 + i * image.len() as u32).to_le_bytes());
    }
    for _ in 0..8 {
        cl2.extend_from_slice(&image);
    }
    fs::write(format!("{dir}/archive.cl2"), cl2).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/huge_count.bin"), u32::MAX.to_le_bytes()).unwrap();
    fs::write(format!("{dir}/cl2_magic_only.bin"), 32u32.to_le_bytes()).unwrap();
    fs::write(format!("{dir}/dun_2x2.bin"), [2, 0, 2, 0, 1, 0]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
