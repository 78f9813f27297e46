pub const INT_BEGIN: u8 = b'i';
pub const LIST_BEGIN: u8 = b'l';
pub const DICT_BEGIN: u8 = b'd';
/// Terminates integers, lists and dicts.
pub const END: u8 = b'e';
pub const SEPARATOR: u8 = b':';
pub const MINUS: u8 = b'-';

/// Enough room for `u64::MAX` in decimal.
pub const MAX_DECIMAL_DIGITS: usize = 20;

#[inline]
pub const fn digit_value(b: u8) -> Option<u8> {
    if b.is_ascii_digit() {
        Some(b - b'0')
    } else {
        None
    }
}

/// Render `n` in decimal without leading zeros, right-aligned into `buf`.
#[inline]
pub fn fmt_decimal(mut n: u64, buf: &mut [u8; MAX_DECIMAL_DIGITS]) -> &[u8] {
    let mut start = MAX_DECIMAL_DIGITS;
    loop {
        start -= 1;
        // n % 10 < 10, so the cast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let d = (n % 10) as u8;
        buf[start] = b'0' + d;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &buf[start..]
}

/// Number of decimal digits needed to render `n`.
#[inline]
#[must_use]
pub const fn decimal_len(mut n: u64) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

/// Length of the encoded integer `i<digits>e`.
#[inline]
#[must_use]
pub const fn int_encoded_len(v: i64) -> usize {
    2 + (v < 0) as usize + decimal_len(v.unsigned_abs())
}

/// Length of the encoded byte string `<len>:<payload>`.
#[inline]
#[must_use]
pub const fn bytes_encoded_len(payload_len: usize) -> usize {
    decimal_len(payload_len as u64) + 1 + payload_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_rendering() {
        let mut buf = [0u8; MAX_DECIMAL_DIGITS];
        assert_eq!(fmt_decimal(0, &mut buf), b"0");
        assert_eq!(fmt_decimal(10, &mut buf), b"10");
        assert_eq!(fmt_decimal(u64::MAX, &mut buf), b"18446744073709551615");
    }

    #[test]
    fn decimal_lengths() {
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(u64::MAX), MAX_DECIMAL_DIGITS);
        assert_eq!(int_encoded_len(-42), 5);
        assert_eq!(int_encoded_len(i64::MIN), 22);
        assert_eq!(bytes_encoded_len(0), 2);
        assert_eq!(bytes_encoded_len(10), 13);
    }
}
