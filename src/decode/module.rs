//! Module framing: the preamble, then a lazy sequence of sections.
//!
//! <https://webassembly.github.io/spec/core/binary/modules.html#binary-module>
use super::helpers::{read_length_prefixed, read_name};
use super::integer::read_bytes4;
use super::{DecodeError, DecodeResult, FromMarkerByte, Malformed};
use crate::core::{CustomSection, KnownSection, Section, SectionId};
use crate::diagnostics::Context;
use crate::span::{ByteCursor, Span};
use phf::phf_ordered_map;
use tracing::debug;

pub const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
pub const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

// Valid marker bytes for [SectionId].
#[expect(non_upper_case_globals)]
static SectionId_MARKERS: phf::OrderedMap<u8, SectionId> = phf_ordered_map! {
    0u8 => SectionId::Custom,
    1u8 => SectionId::Type,
    2u8 => SectionId::Import,
    3u8 => SectionId::Function,
    4u8 => SectionId::Table,
    5u8 => SectionId::Memory,
    6u8 => SectionId::Global,
    7u8 => SectionId::Export,
    8u8 => SectionId::Start,
    9u8 => SectionId::Element,
    10u8 => SectionId::Code,
    11u8 => SectionId::Data,
    12u8 => SectionId::DataCount,
    13u8 => SectionId::Event,
};

impl FromMarkerByte for SectionId {
    const WHAT: &'static str = "section id";

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &SectionId_MARKERS
    }
}

/// Reads a section id and its length-prefixed payload.
fn read_frame<'a>(
    cur: &mut ByteCursor<'a>,
    cx: &Context<'_>,
) -> DecodeResult<(SectionId, Span<'a>)> {
    let start = *cur;
    let id = SectionId::decode_marker(cur, cx)?;
    match read_length_prefixed(cur, cx) {
        Ok(payload) => Ok((id, payload)),
        Err(err) => {
            *cur = start;
            Err(err)
        }
    }
}

/// A module whose sections are framed one per pull.
///
/// A section whose framing is broken (bad id, bad length, length past the end
/// of the input) ends the sequence, since there is no way to find the next
/// one. Anything wrong inside a payload is left for the section readers.
pub struct LazyModule<'a, 'd> {
    /// `None` if the input was too short to hold it.
    pub magic: Option<[u8; 4]>,
    pub version: Option<[u8; 4]>,
    cur: ByteCursor<'a>,
    cx: Context<'d>,
    failed: bool,
}

impl<'a, 'd> LazyModule<'a, 'd> {
    pub fn position(&self) -> usize {
        self.cur.position()
    }

    /// Whether section framing failed before the input was exhausted.
    pub fn has_failed(&self) -> bool {
        self.failed
    }
}

/// Starts decoding `bytes` as a module.
///
/// A wrong magic number or version is recorded as `Malformed`; the sections
/// are still offered.
pub fn read_module<'a, 'd>(bytes: &'a [u8], cx: &Context<'d>) -> LazyModule<'a, 'd> {
    let cx = cx.with_frame("module", 0);
    let mut cur = ByteCursor::new(Span::new(bytes));

    let magic = read_bytes4(&mut cur, &cx).ok();
    if let Some(magic) = magic
        && magic != MAGIC
    {
        let _ = cx.fail::<()>(DecodeError::malformed(0, Malformed::BadMagic(magic)));
    }

    let version = match magic {
        Some(_) => read_bytes4(&mut cur, &cx).ok(),
        None => None,
    };
    if let Some(version) = version
        && version != VERSION
    {
        let _ = cx.fail::<()>(DecodeError::malformed(4, Malformed::BadVersion(version)));
    }

    LazyModule {
        magic,
        version,
        failed: version.is_none(),
        cur,
        cx,
    }
}

impl<'a> Iterator for LazyModule<'a, '_> {
    type Item = Section<'a>;

    fn next(&mut self) -> Option<Section<'a>> {
        loop {
            if self.failed || self.cur.is_empty() {
                return None;
            }

            let offset = self.cur.position();
            let (id, payload) = match read_frame(&mut self.cur, &self.cx) {
                Ok(frame) => frame,
                Err(_) => {
                    self.failed = true;
                    return None;
                }
            };
            debug!(%id, offset, len = payload.len(), "framed section");

            if id != SectionId::Custom {
                return Some(Section::Known(KnownSection { id, payload }));
            }

            let cx = self.cx.with_frame("custom section", offset);
            let mut body = ByteCursor::new(payload);
            match read_name(&mut body, &cx) {
                Ok(name) => {
                    return Some(Section::Custom(CustomSection {
                        name,
                        payload: body.rest(),
                    }));
                }
                // the frame is intact, so the next section can still be found
                Err(_) => debug!(offset, "skipping custom section with an unreadable name"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ErrorKind;
    use crate::diagnostics::DiagnosticLog;
    use crate::features::Features;

    const PREAMBLE: [u8; 8] = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

    fn module(sections: &[u8]) -> Vec<u8> {
        [&PREAMBLE[..], sections].concat()
    }

    #[test]
    fn frames_known_and_custom_sections() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let bytes = module(&[
            0x01, 0x01, 0x00, // type section, empty vector
            0x00, 0x04, 0x02, b'h', b'i', 0xAA, // custom "hi" with one payload byte
        ]);

        let sections: Vec<_> = read_module(&bytes, &cx).collect();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id(), SectionId::Type);
        assert_eq!(sections[0].payload().as_bytes(), &[0x00]);
        assert_eq!(sections[0].payload().begin(), 10);
        let Section::Custom(custom) = sections[1] else {
            panic!("expected a custom section");
        };
        assert_eq!(custom.name, "hi");
        assert_eq!(custom.payload.as_bytes(), &[0xAA]);
        assert!(log.is_empty());
    }

    #[test]
    fn bad_magic_is_recorded_but_sections_are_still_offered() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let mut bytes = module(&[0x01, 0x01, 0x00]);
        bytes[0] = 0xFF;

        let mut m = read_module(&bytes, &cx);
        assert_eq!(m.magic, Some([0xFF, 0x61, 0x73, 0x6D]));
        assert_eq!(m.next().map(|s| s.id()), Some(SectionId::Type));
        assert_eq!(log.entries()[0].kind, ErrorKind::Malformed);
    }

    #[test]
    fn length_past_the_end_stops_the_sequence() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let bytes = module(&[0x01, 0x01, 0x00, 0x0A, 0x05, 0x00]);

        let mut m = read_module(&bytes, &cx);
        assert!(m.next().is_some());
        assert!(m.next().is_none());
        assert!(m.has_failed());
        assert_eq!(m.position(), 11);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn unknown_section_id_stops_the_sequence() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let bytes = module(&[0x0E, 0x00]);

        assert_eq!(read_module(&bytes, &cx).count(), 0);
        assert_eq!(log.entries()[0].kind, ErrorKind::Malformed);
    }

    #[test]
    fn corrupt_custom_name_skips_only_that_section() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let bytes = module(&[
            0x00, 0x02, 0x05, 0x00, // name length runs past the payload
            0x01, 0x01, 0x00,
        ]);

        let ids: Vec<_> = read_module(&bytes, &cx).map(|s| s.id()).collect();
        assert_eq!(ids, vec![SectionId::Type]);
        assert_eq!(log.len(), 1);
    }
}
