//! Non-owning views into the caller's input buffer.
//!
//! Every decoded value that refers to raw bytes (section payloads, function
//! bodies, strings) holds a [`Span`] borrowed from the original buffer, so
//! decoding never copies input.

use std::fmt;

/// A read-only view of a contiguous byte range inside the caller-owned buffer.
///
/// Alongside the bytes, a span remembers the absolute offset of its first byte
/// within the original buffer, so diagnostics and basic blocks can refer to
/// stable positions.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Span<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Span<'a> {
    /// A span covering the whole of `bytes`, starting at offset 0.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub(crate) fn at(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, offset }
    }

    /// Absolute offset of the first byte.
    pub fn begin(&self) -> usize {
        self.offset
    }

    /// Absolute offset one past the last byte.
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The sub-span covering absolute offsets `begin..end`.
    ///
    /// Returns `None` if the range is inverted or not contained in `self`.
    pub fn slice(&self, begin: usize, end: usize) -> Option<Span<'a>> {
        if begin > end || begin < self.begin() || end > self.end() {
            return None;
        }
        let bytes = &self.bytes[begin - self.offset..end - self.offset];
        Some(Span::at(bytes, begin))
    }

    /// An empty span positioned at absolute offset `at`.
    pub fn empty_at(at: usize) -> Span<'a> {
        Span::at(&[], at)
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({:#x}..{:#x})", self.begin(), self.end())
    }
}

/// Forward-only cursor over a [`Span`].
///
/// Reads shrink the remaining view from the front. The cursor is `Clone` so a
/// decoder can speculatively read from a copy and commit only on success.
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    rest: Span<'a>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(span: Span<'a>) -> Self {
        Self { rest: span }
    }

    /// Absolute offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.rest.begin()
    }

    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// The unread portion of the input.
    pub fn rest(&self) -> Span<'a> {
        self.rest
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.rest.bytes.first().copied()
    }

    /// Consumes one byte. Leaves the cursor untouched at end of input.
    pub fn take_u8(&mut self) -> Option<u8> {
        let (&b, tail) = self.rest.bytes.split_first()?;
        self.rest = Span::at(tail, self.rest.offset + 1);
        Some(b)
    }

    /// Consumes exactly `n` bytes, or nothing if fewer remain.
    pub fn take(&mut self, n: usize) -> Option<Span<'a>> {
        if n > self.rest.len() {
            return None;
        }
        let (head, tail) = self.rest.bytes.split_at(n);
        let taken = Span::at(head, self.rest.offset);
        self.rest = Span::at(tail, self.rest.offset + n);
        Some(taken)
    }

    /// Consumes everything that is left.
    pub fn take_rest(&mut self) -> Span<'a> {
        let taken = self.rest;
        self.rest = Span::empty_at(taken.end());
        taken
    }
}
