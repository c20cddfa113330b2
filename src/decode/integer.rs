//! Fixed-width and LEB128-encoded numbers.
//!
//! <https://en.wikipedia.org/wiki/LEB128>
//! <https://webassembly.github.io/spec/core/binary/values.html#integers>
//!
//! An N-bit integer takes at most `ceil(N/7)` bytes. In that last permitted
//! byte, the bits beyond the N-bit payload must be zero (unsigned) or copies of
//! the payload's sign bit (signed). Both rules are enforced.
use super::{Decode, DecodeError, DecodeResult, Malformed};
use crate::diagnostics::Context;
use crate::span::ByteCursor;

const PAYLOAD: u8 = 0b0111_1111; /* 0x7F */
const CONTINUATION: u8 = 0b1000_0000; /* 0x80 */
const SIGN: u8 = 0b0100_0000; /* 0x40 */

fn eof<T>(cur: &ByteCursor<'_>, needed: usize, cx: &Context<'_>) -> DecodeResult<T> {
    cx.fail(DecodeError::malformed(
        cur.position(),
        Malformed::UnexpectedEof {
            needed,
            remaining: cur.remaining(),
        },
    ))
}

fn max_bytes(bits: u32) -> u32 {
    bits.div_ceil(7)
}

fn read_unsigned(
    cur: &mut ByteCursor<'_>,
    cx: &Context<'_>,
    bits: u32,
    what: &'static str,
) -> DecodeResult<u64> {
    let start = *cur;
    let mut probe = *cur;
    let max = max_bytes(bits);
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for i in 1..=max {
        let Some(byte) = probe.take_u8() else {
            return eof(&start, start.remaining() + 1, cx);
        };
        result |= u64::from(byte & PAYLOAD) << shift;

        if byte & CONTINUATION == 0 {
            if i == max {
                // 7*(max-1) bits were consumed by earlier bytes, which leaves
                // `used` bits of payload for this one.
                let used = bits - shift;
                if (byte & PAYLOAD) >> used != 0 {
                    return cx.fail(DecodeError::malformed(
                        start.position(),
                        Malformed::Leb128TooLarge { what },
                    ));
                }
            }
            *cur = probe;
            return Ok(result);
        }

        shift += 7;
    }

    cx.fail(DecodeError::malformed(
        start.position(),
        Malformed::Leb128TooLong { what },
    ))
}

fn read_signed(
    cur: &mut ByteCursor<'_>,
    cx: &Context<'_>,
    bits: u32,
    what: &'static str,
) -> DecodeResult<i64> {
    let start = *cur;
    let mut probe = *cur;
    let max = max_bytes(bits);
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    for i in 1..=max {
        let Some(byte) = probe.take_u8() else {
            return eof(&start, start.remaining() + 1, cx);
        };
        result |= i64::from(byte & PAYLOAD) << shift;

        if byte & CONTINUATION == 0 {
            if i == max {
                // Everything from the payload's sign bit upwards must be
                // all ones or all zeros.
                let used = bits - shift;
                let extension = (byte & PAYLOAD) >> (used - 1);
                let all_ones = PAYLOAD >> (used - 1);
                if extension != 0 && extension != all_ones {
                    return cx.fail(DecodeError::malformed(
                        start.position(),
                        Malformed::Leb128TooLarge { what },
                    ));
                }
            }

            shift += 7;
            if shift < 64 && byte & SIGN != 0 {
                result |= !0 << shift;
            }
            *cur = probe;
            return Ok(result);
        }

        shift += 7;
    }

    cx.fail(DecodeError::malformed(
        start.position(),
        Malformed::Leb128TooLong { what },
    ))
}

pub fn read_u32(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<u32> {
    // the width check above guarantees the value fits
    read_unsigned(cur, cx, 32, "u32").map(|v| v as u32)
}

pub fn read_u64(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<u64> {
    read_unsigned(cur, cx, 64, "u64")
}

pub fn read_s32(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<i32> {
    read_signed(cur, cx, 32, "s32").map(|v| v as i32)
}

/// The signed 33-bit encoding used for type indices in block types.
pub fn read_s33(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<i64> {
    read_signed(cur, cx, 33, "s33")
}

pub fn read_s64(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<i64> {
    read_signed(cur, cx, 64, "s64")
}

pub fn read_u8(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<u8> {
    match cur.take_u8() {
        Some(b) => Ok(b),
        None => eof(cur, 1, cx),
    }
}

fn read_fixed<const N: usize>(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<[u8; N]> {
    let Some(span) = cur.take(N) else {
        return eof(cur, N, cx);
    };
    let mut buf = [0u8; N];
    buf.copy_from_slice(span.as_bytes());
    Ok(buf)
}

pub fn read_f32(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<f32> {
    read_fixed::<4>(cur, cx).map(f32::from_le_bytes)
}

pub fn read_f64(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<f64> {
    read_fixed::<8>(cur, cx).map(f64::from_le_bytes)
}

pub fn read_v128(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<[u8; 16]> {
    read_fixed::<16>(cur, cx)
}

pub(crate) fn read_bytes4(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<[u8; 4]> {
    read_fixed::<4>(cur, cx)
}

impl Decode<'_> for u32 {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        read_u32(cur, cx)
    }
}

impl Decode<'_> for u8 {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        read_u8(cur, cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ErrorKind;
    use crate::diagnostics::{DiagnosticLog, NopDiagnostics};
    use crate::features::Features;
    use crate::span::Span;

    fn with_cursor<T>(
        bytes: &[u8],
        f: impl FnOnce(&mut ByteCursor<'_>, &Context<'_>) -> DecodeResult<T>,
    ) -> (DecodeResult<T>, usize) {
        let cx = Context::new(Features::mvp(), &NopDiagnostics);
        let mut cur = ByteCursor::new(Span::new(bytes));
        let result = f(&mut cur, &cx);
        (result, cur.position())
    }

    #[test]
    fn u32_small_and_padded() {
        assert_eq!(with_cursor(&[0x00], read_u32), (Ok(0), 1));
        assert_eq!(with_cursor(&[0x7F], read_u32), (Ok(127), 1));
        assert_eq!(with_cursor(&[0x80, 0x01], read_u32), (Ok(128), 2));
        // a padded zero is still a valid encoding
        assert_eq!(with_cursor(&[0x80, 0x80, 0x00], read_u32), (Ok(0), 3));
        assert_eq!(
            with_cursor(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F], read_u32),
            (Ok(u32::MAX), 5)
        );
    }

    #[test]
    fn u32_six_bytes_is_too_long() {
        let (result, pos) = with_cursor(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01], read_u32);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert_eq!(
            err,
            DecodeError::malformed(0, Malformed::Leb128TooLong { what: "u32" })
        );
        assert_eq!(pos, 0);
    }

    #[test]
    fn u32_rejects_bits_past_the_width() {
        let (result, pos) = with_cursor(&[0xFF, 0xFF, 0xFF, 0xFF, 0x1F], read_u32);
        assert_eq!(
            result.unwrap_err(),
            DecodeError::malformed(0, Malformed::Leb128TooLarge { what: "u32" })
        );
        assert_eq!(pos, 0);
    }

    #[test]
    fn truncated_varint_is_malformed() {
        let (result, pos) = with_cursor(&[0x80, 0x80], read_u32);
        assert!(matches!(
            result,
            Err(DecodeError::Malformed {
                offset: 0,
                reason: Malformed::UnexpectedEof { .. }
            })
        ));
        assert_eq!(pos, 0);
    }

    #[test]
    fn u64_limits() {
        let max = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        assert_eq!(with_cursor(&max, read_u64), (Ok(u64::MAX), 10));

        let too_large = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x03];
        assert!(with_cursor(&too_large, read_u64).0.is_err());
    }

    #[test]
    fn s32_sign_extension() {
        assert_eq!(with_cursor(&[0x7F], read_s32), (Ok(-1), 1));
        assert_eq!(with_cursor(&[0x3F], read_s32), (Ok(63), 1));
        assert_eq!(with_cursor(&[0x40], read_s32), (Ok(-64), 1));
        assert_eq!(with_cursor(&[0xC0, 0xBB, 0x78], read_s32), (Ok(-123_456), 3));
        assert_eq!(
            with_cursor(&[0x80, 0x80, 0x80, 0x80, 0x78], read_s32),
            (Ok(i32::MIN), 5)
        );
        assert_eq!(
            with_cursor(&[0xFF, 0xFF, 0xFF, 0xFF, 0x07], read_s32),
            (Ok(i32::MAX), 5)
        );
    }

    #[test]
    fn s32_rejects_inconsistent_sign_bits() {
        // the payload's sign bit is 0 but the unused bits are set
        assert!(with_cursor(&[0xFF, 0xFF, 0xFF, 0xFF, 0x4F], read_s32).0.is_err());
        // the payload's sign bit is 1 but the unused bits are clear
        assert!(with_cursor(&[0x80, 0x80, 0x80, 0x80, 0x08], read_s32).0.is_err());
    }

    #[test]
    fn s64_limits() {
        let min = [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x7F];
        assert_eq!(with_cursor(&min, read_s64), (Ok(i64::MIN), 10));

        let max = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
        assert_eq!(with_cursor(&max, read_s64), (Ok(i64::MAX), 10));

        let bad = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        assert!(with_cursor(&bad, read_s64).0.is_err());
    }

    #[test]
    fn round_trips_through_canonical_encoding() {
        fn encode_unsigned(mut n: u64) -> Vec<u8> {
            let mut out = Vec::new();
            loop {
                let byte = (n & 0x7F) as u8;
                n >>= 7;
                if n == 0 {
                    out.push(byte);
                    return out;
                }
                out.push(byte | 0x80);
            }
        }

        fn encode_signed(mut n: i64) -> Vec<u8> {
            let mut out = Vec::new();
            loop {
                let byte = (n & 0x7F) as u8;
                n >>= 7;
                let done = (n == 0 && byte & 0x40 == 0) || (n == -1 && byte & 0x40 != 0);
                if done {
                    out.push(byte);
                    return out;
                }
                out.push(byte | 0x80);
            }
        }

        for n in [0u32, 1, 127, 128, 300, 16_384, u32::MAX / 3, u32::MAX] {
            assert_eq!(with_cursor(&encode_unsigned(n.into()), read_u32).0, Ok(n));
        }
        for n in [0u64, 1 << 35, u64::MAX - 1, u64::MAX] {
            assert_eq!(with_cursor(&encode_unsigned(n), read_u64).0, Ok(n));
        }
        for n in [0i32, -1, 63, 64, -65, i32::MIN, i32::MAX] {
            assert_eq!(with_cursor(&encode_signed(n.into()), read_s32).0, Ok(n));
        }
        for n in [0i64, -1, 1 << 40, -(1 << 40), i64::MIN, i64::MAX] {
            assert_eq!(with_cursor(&encode_signed(n), read_s64).0, Ok(n));
        }
    }

    #[test]
    fn floats_are_little_endian() {
        assert_eq!(
            with_cursor(&1.5f32.to_le_bytes(), read_f32),
            (Ok(1.5), 4)
        );
        assert_eq!(
            with_cursor(&(-2.25f64).to_le_bytes(), read_f64),
            (Ok(-2.25), 8)
        );
    }

    #[test]
    fn short_fixed_width_read_reports_once() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let buf = [0u8; 3];
        let mut cur = ByteCursor::new(Span::new(&buf));

        assert!(read_f32(&mut cur, &cx).is_err());
        assert_eq!(cur.position(), 0);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].kind, ErrorKind::Malformed);
    }
}
