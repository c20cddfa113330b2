//! Pull-driven, single-pass sequences of decoded values.
//!
//! Nothing is decoded until the consumer pulls, and each pull decodes exactly
//! one element. A consumer may stop at any point; the rest of the bytes are
//! never looked at. Once an element fails to decode the sequence yields
//! nothing more, and the failure is already in the diagnostic sink.
use super::helpers::{expect_consumed, read_count};
use super::Decode;
use crate::diagnostics::Context;
use crate::span::{ByteCursor, Span};
use std::marker::PhantomData;

/// A single-pass sequence of `T`.
///
/// Two flavours share this type: count-prefixed sequences stop after the
/// declared number of elements, and extent-terminated ones (instruction
/// streams) stop when their bytes run out.
pub struct LazySequence<'a, 'd, T> {
    cur: ByteCursor<'a>,
    cx: Context<'d>,
    remaining: Option<u32>,
    /// Checked once a counted sequence is exhausted.
    extent_label: Option<&'static str>,
    failed: bool,
    _item: PhantomData<fn() -> T>,
}

impl<'a, 'd, T> LazySequence<'a, 'd, T> {
    /// A sequence that runs until `span` is exhausted.
    pub fn new(span: Span<'a>, cx: &Context<'d>) -> Self {
        Self {
            cur: ByteCursor::new(span),
            cx: cx.clone(),
            remaining: None,
            extent_label: None,
            failed: false,
            _item: PhantomData,
        }
    }

    /// A sequence of exactly `count` elements starting at `cur`.
    pub(crate) fn counted(cur: ByteCursor<'a>, count: u32, cx: Context<'d>) -> Self {
        Self {
            cur,
            cx,
            remaining: Some(count),
            extent_label: None,
            failed: false,
            _item: PhantomData,
        }
    }

    fn failed_at(cur: ByteCursor<'a>, cx: Context<'d>) -> Self {
        Self {
            cur,
            cx,
            remaining: Some(0),
            extent_label: None,
            failed: true,
            _item: PhantomData,
        }
    }

    /// Absolute offset of the next element.
    pub fn position(&self) -> usize {
        self.cur.position()
    }

    /// The bytes not yet decoded.
    pub fn rest(&self) -> Span<'a> {
        self.cur.rest()
    }

    /// Whether the sequence stopped because an element failed to decode.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Elements still to come in a counted sequence.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }
}

impl<'a, T: Decode<'a>> Iterator for LazySequence<'a, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.failed {
            return None;
        }
        match self.remaining {
            Some(0) => return None,
            None if self.cur.is_empty() => return None,
            _ => {}
        }

        match T::decode(&mut self.cur, &mut self.cx) {
            Ok(item) => {
                if let Some(n) = self.remaining.as_mut() {
                    *n -= 1;
                    if *n == 0
                        && let Some(label) = self.extent_label
                    {
                        // trailing bytes are reported but do not take back the
                        // elements already produced
                        let _ = expect_consumed(&self.cur, label, &self.cx);
                    }
                }
                Some(item)
            }
            Err(_) => {
                self.failed = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.failed, self.remaining) {
            (true, _) => (0, Some(0)),
            (false, Some(n)) => (0, Some(n as usize)),
            (false, None) => (0, Some(self.cur.remaining())),
        }
    }
}

/// A count-prefixed section body: the count is read up front, the elements
/// on demand.
pub struct LazySection<'a, 'd, T> {
    count: Option<u32>,
    sequence: LazySequence<'a, 'd, T>,
}

impl<'a, 'd, T> LazySection<'a, 'd, T> {
    /// Reads the element count at the start of `payload`. Every diagnostic
    /// raised while iterating carries a `label` frame.
    pub fn new(payload: Span<'a>, label: &'static str, cx: &Context<'d>) -> Self {
        let cx = cx.with_frame(label, payload.begin());
        let mut cur = ByteCursor::new(payload);
        match read_count(&mut cur, &cx) {
            Ok(count) => {
                let mut sequence = LazySequence::counted(cur, count, cx);
                sequence.extent_label = Some(label);
                if count == 0 {
                    let _ = expect_consumed(&sequence.cur, label, &sequence.cx);
                }
                Self {
                    count: Some(count),
                    sequence,
                }
            }
            Err(_) => Self {
                count: None,
                sequence: LazySequence::failed_at(cur, cx),
            },
        }
    }

    /// A section that yields nothing, for payloads rejected before their
    /// count was read.
    pub(crate) fn failed(payload: Span<'a>, label: &'static str, cx: &Context<'d>) -> Self {
        Self {
            count: None,
            sequence: LazySequence::failed_at(
                ByteCursor::new(payload),
                cx.with_frame(label, payload.begin()),
            ),
        }
    }

    /// The declared element count; `None` if it could not be read.
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn position(&self) -> usize {
        self.sequence.position()
    }

    pub fn has_failed(&self) -> bool {
        self.sequence.has_failed()
    }

    pub fn into_sequence(self) -> LazySequence<'a, 'd, T> {
        self.sequence
    }
}

impl<'a, T: Decode<'a>> Iterator for LazySection<'a, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.sequence.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sequence.size_hint()
    }
}
