use super::integer::read_u32;
use super::{Decode, DecodeError, DecodeResult, Malformed};
use crate::diagnostics::Context;
use crate::span::{ByteCursor, Span};

pub(crate) fn peek_u8(cur: &ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<u8> {
    match cur.peek_u8() {
        Some(b) => Ok(b),
        None => cx.fail(DecodeError::malformed(
            cur.position(),
            Malformed::UnexpectedEof {
                needed: 1,
                remaining: 0,
            },
        )),
    }
}

/// Takes exactly `len` bytes as a sub-span.
pub(crate) fn read_span<'a>(
    cur: &mut ByteCursor<'a>,
    len: usize,
    cx: &Context<'_>,
) -> DecodeResult<Span<'a>> {
    match cur.take(len) {
        Some(span) => Ok(span),
        None => cx.fail(DecodeError::malformed(
            cur.position(),
            Malformed::UnexpectedEof {
                needed: len,
                remaining: cur.remaining(),
            },
        )),
    }
}

/// A LEB128 length followed by that many raw bytes.
pub fn read_length_prefixed<'a>(
    cur: &mut ByteCursor<'a>,
    cx: &Context<'_>,
) -> DecodeResult<Span<'a>> {
    let start = *cur;
    let len = read_u32(cur, cx)?;
    match read_span(cur, len as usize, cx) {
        Ok(span) => Ok(span),
        Err(err) => {
            *cur = start;
            Err(err)
        }
    }
}

/// A length-prefixed UTF-8 string, borrowed from the input.
pub fn read_name<'a>(cur: &mut ByteCursor<'a>, cx: &Context<'_>) -> DecodeResult<&'a str> {
    let start = *cur;
    let bytes = read_length_prefixed(cur, cx)?;
    match std::str::from_utf8(bytes.as_bytes()) {
        Ok(s) => Ok(s),
        Err(err) => {
            *cur = start;
            cx.fail(DecodeError::malformed(
                bytes.begin() + err.valid_up_to(),
                err.into(),
            ))
        }
    }
}

/// A vector or section element count.
///
/// Every element takes at least one byte, so a count larger than the bytes
/// that remain cannot be honest; refusing it up front keeps a truncated but
/// huge count from driving allocation.
pub fn read_count(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<u32> {
    let start = *cur;
    let count = read_u32(cur, cx)?;
    if count as usize > cur.remaining() {
        let limit = cur.remaining() as u64;
        *cur = start;
        return cx.fail(DecodeError::OutOfRange {
            offset: start.position(),
            what: "count",
            value: count.into(),
            limit,
        });
    }
    Ok(count)
}

/// A count followed by that many `T`s, collected eagerly.
pub(crate) fn read_vector<'a, T: Decode<'a>>(
    cur: &mut ByteCursor<'a>,
    cx: &mut Context<'_>,
) -> DecodeResult<Vec<T>> {
    let count = read_count(cur, cx)?;
    let mut items = Vec::with_capacity(count as usize);
    for _ in 0..count {
        items.push(T::decode(cur, cx)?);
    }
    Ok(items)
}

/// Fails if a fixed-size region was not consumed in full.
pub(crate) fn expect_consumed(
    cur: &ByteCursor<'_>,
    what: &'static str,
    cx: &Context<'_>,
) -> DecodeResult<()> {
    if cur.is_empty() {
        return Ok(());
    }
    cx.fail(DecodeError::malformed(
        cur.position(),
        Malformed::TrailingBytes {
            what,
            leftover: cur.remaining(),
        },
    ))
}
