use crate::core::types::{EventAttribute, EventType};
use crate::decode::integer::read_u32;
use crate::decode::{Decode, DecodeResult, FromMarkerByte};
use crate::diagnostics::Context;
use crate::span::ByteCursor;
use phf::phf_ordered_map;

impl Decode<'_> for EventType {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let cx = cx.scope("event type", cur.position());
        let attribute = EventAttribute::decode_marker(cur, &cx)?;
        let type_index = read_u32(cur, &cx)?;
        Ok(EventType {
            attribute,
            type_index,
        })
    }
}

// Valid marker bytes for [EventAttribute].
#[expect(non_upper_case_globals)]
static EventAttribute_MARKERS: phf::OrderedMap<u8, EventAttribute> = phf_ordered_map! {
    0x00u8 => EventAttribute::Exception,
};

impl FromMarkerByte for EventAttribute {
    const WHAT: &'static str = "event attribute";

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &EventAttribute_MARKERS
    }
}
