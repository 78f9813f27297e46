use canon_bencode::{decode, decode_with_limits, DecodeError, DecodeLimits, Decoder, ErrorCode};

#[test]
fn depth_limit_rejects_the_first_container_past_the_limit() {
    let limits = DecodeLimits::with_depth(1);
    assert!(decode_with_limits(b"li1ee", limits).is_ok());

    let err = decode_with_limits(b"llee", limits).unwrap_err();
    assert_eq!(err, DecodeError::new(ErrorCode::DepthLimitExceeded, b'l', 1));
    assert!(err.is_limit());

    let err = decode_with_limits(b"ld1:ad1:bi1eeee", DecodeLimits::with_depth(2)).unwrap_err();
    assert_eq!(err, DecodeError::new(ErrorCode::DepthLimitExceeded, b'd', 5));
}

#[test]
fn default_depth_limit_stops_runaway_nesting() {
    let mut deep = vec![b'l'; 10_000];
    deep.extend(std::iter::repeat(b'e').take(10_000));
    let err = decode(&deep).unwrap_err();
    assert_eq!(err.code, ErrorCode::DepthLimitExceeded);
    assert_eq!(err.offset, canon_bencode::DEFAULT_MAX_DEPTH);
}

#[test]
fn input_len_limit_is_checked_before_parsing() {
    let limits = DecodeLimits::for_bytes(3);
    let err = decode_with_limits(b"i10e", limits).unwrap_err();
    assert_eq!(err, DecodeError::new(ErrorCode::InputLenLimitExceeded, 0, 0));
    assert!(decode_with_limits(b"i1e", limits).is_ok());

    let err = Decoder::with_limits(b"i10e", limits).unwrap_err();
    assert_eq!(err.code, ErrorCode::InputLenLimitExceeded);
}

#[test]
fn bytes_len_limit_applies_to_declared_lengths() {
    let limits = DecodeLimits {
        max_bytes_len: 3,
        ..DecodeLimits::default()
    };
    assert!(decode_with_limits(b"3:abc", limits).is_ok());

    let err = decode_with_limits(b"l4:spame", limits).unwrap_err();
    assert_eq!(err, DecodeError::new(ErrorCode::BytesLenLimitExceeded, b'4', 1));

    // Checked before the payload is read, so truncation is not reported.
    let err = decode_with_limits(b"d1000:", limits).unwrap_err();
    assert_eq!(err, DecodeError::new(ErrorCode::BytesLenLimitExceeded, b'1', 1));
}

#[test]
fn grammar_errors_are_not_limit_errors() {
    let err = decode(b"i-0e").unwrap_err();
    assert!(!err.is_limit());
}
