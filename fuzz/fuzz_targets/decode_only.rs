#![no_main]

use libfuzzer_sys::fuzz_target;

use canon_bencode::{decode_with_limits, DecodeLimits, Decoder};

fn fuzz_limits(input_len: usize) -> DecodeLimits {
    let max = input_len.min(1 << 20);
    DecodeLimits {
        max_input_bytes: max,
        max_depth: 64,
        max_bytes_len: max,
    }
}

fuzz_target!(|data: &[u8]| {
    let limits = fuzz_limits(data.len());
    let _ = decode_with_limits(data, limits);

    // Walk concatenated values until the first error.
    if let Ok(mut decoder) = Decoder::with_limits(data, limits) {
        while let Ok(Some(_)) = decoder.next_value() {}
        assert!(decoder.position() <= data.len());
    }
});
