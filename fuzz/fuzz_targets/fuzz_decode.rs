#![no_main]
use libfuzzer_sys::fuzz_target;
use pnmtool::transform::{contrast, sharpen, smooth};

fuzz_target!(|data: &[u8]| {
    // Decode must never panic, whatever the header claims
    let _ = pnmtool::ImageInfo::from_bytes(data);
    let Ok(mut buffer) = pnmtool::decode(data, enough::Unstoppable) else {
        return;
    };

    // Neither may the transforms on anything that decoded
    let mut blurred = buffer.clone();
    let _ = smooth(&mut blurred);
    let _ = sharpen(&mut buffer.clone());
    let _ = contrast(&mut buffer);
});
