//! The `name` custom section.
//!
//! <https://webassembly.github.io/spec/core/appendix/custom.html#name-section>
use super::helpers::{read_length_prefixed, read_name};
use super::integer::{read_u32, read_u8};
use super::lazy::{LazySection, LazySequence};
use super::{Decode, DecodeResult};
use crate::core::{CustomSection, NameAssoc, NameSubsection, NameSubsectionId};
use crate::diagnostics::Context;
use crate::span::ByteCursor;

pub const NAME_SECTION: &str = "name";

pub type LazyNameSection<'a, 'd> = LazySequence<'a, 'd, NameSubsection<'a>>;
pub type LazyFunctionNames<'a, 'd> = LazySection<'a, 'd, NameAssoc<'a>>;

/// Subsections of a `name` custom section, in order, until its payload runs out.
pub fn read_name_section<'a, 'd>(
    sec: CustomSection<'a>,
    cx: &Context<'d>,
) -> LazyNameSection<'a, 'd> {
    let cx = cx.with_frame("name section", sec.payload.begin());
    LazySequence::new(sec.payload, &cx)
}

/// The index/name pairs of a function names subsection.
pub fn read_function_names<'a, 'd>(
    sub: NameSubsection<'a>,
    cx: &Context<'d>,
) -> LazyFunctionNames<'a, 'd> {
    LazySection::new(sub.payload, "function names", cx)
}

impl From<u8> for NameSubsectionId {
    fn from(id: u8) -> Self {
        match id {
            0 => NameSubsectionId::ModuleName,
            1 => NameSubsectionId::FunctionNames,
            2 => NameSubsectionId::LocalNames,
            other => NameSubsectionId::Other(other),
        }
    }
}

impl<'a> Decode<'a> for NameSubsection<'a> {
    fn decode(cur: &mut ByteCursor<'a>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let cx = cx.scope("name subsection", cur.position());
        let start = *cur;
        let id = read_u8(cur, &cx)?.into();
        match read_length_prefixed(cur, &cx) {
            Ok(payload) => Ok(NameSubsection { id, payload }),
            Err(err) => {
                *cur = start;
                Err(err)
            }
        }
    }
}

impl<'a> Decode<'a> for NameAssoc<'a> {
    fn decode(cur: &mut ByteCursor<'a>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let index = read_u32(cur, cx)?;
        let name = read_name(cur, cx)?;
        Ok(NameAssoc { index, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ErrorKind;
    use crate::diagnostics::DiagnosticLog;
    use crate::features::Features;
    use crate::span::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn subsections_and_function_names() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let payload = [
            0x00, 0x02, 0x01, b'm', // module name "m"
            0x01, 0x07, 0x02, 0x00, 0x01, b'a', 0x03, 0x01, b'b', // 0 => a, 3 => b
            0x07, 0x01, 0x00, // a subsection this crate does not interpret
        ];
        let sec = CustomSection {
            name: NAME_SECTION,
            payload: Span::new(&payload),
        };

        let subs: Vec<_> = read_name_section(sec, &cx).collect();
        assert_eq!(
            subs.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![
                NameSubsectionId::ModuleName,
                NameSubsectionId::FunctionNames,
                NameSubsectionId::Other(7),
            ]
        );

        let names: Vec<_> = read_function_names(subs[1], &cx).collect();
        assert_eq!(
            names,
            vec![
                NameAssoc { index: 0, name: "a" },
                NameAssoc { index: 3, name: "b" },
            ]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn truncated_subsection_stops_the_sequence() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let payload = [0x01, 0x09, 0x00];
        let sec = CustomSection {
            name: NAME_SECTION,
            payload: Span::new(&payload),
        };

        let mut subs = read_name_section(sec, &cx);
        assert_eq!(subs.next(), None);
        assert!(subs.has_failed());

        let entries = log.into_entries();
        assert_eq!(entries[0].kind, ErrorKind::Malformed);
        assert_eq!(entries[0].context[0].label, "name section");
        assert_eq!(entries[0].context[1].label, "name subsection");
    }
}
