use crate::core::types::ExternalKind;
use crate::decode::{Decode, DecodeResult, FromMarkerByte};
use crate::diagnostics::Context;
use crate::features::Feature;
use crate::span::ByteCursor;
use phf::phf_ordered_map;

// Valid marker bytes for [ExternalKind].
#[expect(non_upper_case_globals)]
static ExternalKind_MARKERS: phf::OrderedMap<u8, ExternalKind> = phf_ordered_map! {
    0x00u8 => ExternalKind::Function,
    0x01u8 => ExternalKind::Table,
    0x02u8 => ExternalKind::Memory,
    0x03u8 => ExternalKind::Global,
    0x04u8 => ExternalKind::Event,
};

impl FromMarkerByte for ExternalKind {
    const WHAT: &'static str = "external kind";

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &ExternalKind_MARKERS
    }
}

impl Decode<'_> for ExternalKind {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut probe = *cur;
        let kind = Self::decode_marker(&mut probe, cx)?;
        if kind == ExternalKind::Event {
            cx.require(Feature::Exceptions, "event", cur.position())?;
        }
        *cur = probe;
        Ok(kind)
    }
}
