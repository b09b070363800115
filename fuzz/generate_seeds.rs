#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // P6 2x2
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/p6_2x2.ppm"), ppm).unwrap();

    // P5 3x2
    let pgm = b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64";
    fs::write(format!("{dir}/p5_3x2.pgm"), pgm).unwrap();

    // P3 2x1 with comments
    let p3 = b"P3\n# seed\n# two lines\n2 1\n255\n255 0 0\n0 0 255\n";
    fs::write(format!("{dir}/p3_comments.ppm"), p3).unwrap();

    // P2 3x3, one interior pixel for the filters
    let p2 = b"P2\n3 3\n255\n0 0 0\n0 90 0\n0 0 0\n";
    fs::write(format!("{dir}/p2_3x3.pgm"), p2).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/p3_short.bin"), b"P3\n2 2\n255\n1 2 3").unwrap();
    fs::write(format!("{dir}/p2_words.bin"), b"P2\n1 1\n255\nwhite").unwrap();
    fs::write(format!("{dir}/huge_dims.bin"), b"P5\n4294967295 4294967295\n255\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
