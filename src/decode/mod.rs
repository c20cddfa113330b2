//! Decoders for WebAssembly values, types, instructions and sections.
//!
//! Every decoder reads from a [`ByteCursor`] and threads the session
//! [`Context`] through. On success the cursor sits just past the decoded
//! value; on failure it is left at the offending bytes and the failure has
//! already been reported to the context's sink.
mod error;
pub(crate) mod helpers;
pub mod instructions;
pub mod integer;
pub mod lazy;
pub mod module;
pub mod names;
pub mod sections;
pub mod types;

pub use error::{DecodeError, DecodeResult, ErrorKind, Malformed};
pub use instructions::LazyExpression;
pub use lazy::{LazySection, LazySequence};
pub use module::{LazyModule, read_module};

use crate::diagnostics::Context;
use crate::span::ByteCursor;

/// A value that can be decoded from the binary format.
pub trait Decode<'a>: Sized {
    fn decode(cur: &mut ByteCursor<'a>, cx: &mut Context<'_>) -> DecodeResult<Self>;
}

pub(crate) trait FromMarkerByte
where
    Self: Sized + Copy + std::fmt::Debug + 'static,
{
    /// Used in diagnostics, e.g. "value type".
    const WHAT: &'static str;

    // defines the mapping between expected bytes and the corresponding value
    fn markers() -> &'static phf::OrderedMap<u8, Self>;

    fn markers_formatted() -> String {
        Self::markers()
            .entries()
            .map(|(marker, variant)| format!("{marker:#04X} ({variant:?})"))
            .collect::<Vec<String>>()
            .join(", ")
    }

    fn from_marker(b: u8) -> Option<Self> {
        Self::markers().get(&b).copied()
    }

    /// Reads one byte and maps it through [`Self::markers`].
    fn decode_marker(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<Self> {
        let offset = cur.position();
        let byte = helpers::peek_u8(cur, cx)?;
        match Self::from_marker(byte) {
            Some(value) => {
                cur.take_u8();
                Ok(value)
            }
            None => cx.fail(DecodeError::malformed(
                offset,
                Malformed::InvalidMarker {
                    what: Self::WHAT,
                    expected: Self::markers_formatted(),
                    byte,
                },
            )),
        }
    }
}
