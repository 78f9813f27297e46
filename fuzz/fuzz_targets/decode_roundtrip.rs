#![no_main]

use libfuzzer_sys::fuzz_target;

use canon_bencode::{decode, decode_with_limits, encode, validate_canonical, DecodeLimits};

fuzz_target!(|data: &[u8]| {
    let limits = DecodeLimits::with_depth(64);
    let Ok(v) = decode_with_limits(data, limits) else {
        return;
    };

    // Whatever decodes must re-encode canonically and decode back to the same value.
    let out = encode(&v);
    let canon = validate_canonical(&out).expect("encoder output is canonical");
    assert_eq!(decode(&out).expect("re-decode"), v);

    // Canonical input is reproduced byte for byte.
    if validate_canonical(data).is_ok() {
        assert_eq!(out, data);
        assert_eq!(canon.sha256(), v.sha256_canonical());
    }
});
