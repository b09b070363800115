#![no_main]
use libfuzzer_sys::fuzz_target;
use pnmtool::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding in either encoding and decoding again
    // must produce identical samples
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    for request in [EncodeRequest::ascii(), EncodeRequest::binary()] {
        let Ok(reencoded) = request.encode(&decoded, enough::Unstoppable) else {
            panic!("decoded buffer failed to encode");
        };
        let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };

        assert_eq!(decoded.cols(), decoded2.cols());
        assert_eq!(decoded.rows(), decoded2.rows());
        assert_eq!(decoded.comment(), decoded2.comment());
        let channels = decoded.channels();
        for (a, b) in decoded.planes().zip(decoded2.planes()).take(channels) {
            assert_eq!(a.buf(), b.buf(), "roundtrip sample mismatch");
        }
    }
});
