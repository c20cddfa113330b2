use crate::core::types::{GlobalType, Mutability, ValueType};
use crate::decode::{Decode, DecodeResult, FromMarkerByte};
use crate::diagnostics::Context;
use crate::span::ByteCursor;
use phf::phf_ordered_map;

impl Decode<'_> for GlobalType {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("global type", cur.position());
        let value_type = ValueType::decode(cur, &mut cx)?;
        let mutability = Mutability::decode_marker(cur, &cx)?;
        Ok(GlobalType {
            value_type,
            mutability,
        })
    }
}

// Valid marker bytes for [Mutability].
#[expect(non_upper_case_globals)]
static Mutability_MARKERS: phf::OrderedMap<u8, Mutability> = phf_ordered_map! {
    0x00u8 => Mutability::Const,
    0x01u8 => Mutability::Var,
};

impl FromMarkerByte for Mutability {
    const WHAT: &'static str = "mutability";

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &Mutability_MARKERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodeError, Malformed};
    use crate::diagnostics::{DiagnosticLog, Frame};
    use crate::features::Features;
    use crate::span::Span;

    #[test]
    fn decodes_mutable_global() {
        let mut cx = Context::new(Features::mvp(), &crate::NopDiagnostics);
        let bytes = [0x7E, 0x01];
        let mut cur = ByteCursor::new(Span::new(&bytes));
        assert_eq!(
            GlobalType::decode(&mut cur, &mut cx),
            Ok(GlobalType {
                value_type: ValueType::I64,
                mutability: Mutability::Var
            })
        );
        assert!(cur.is_empty());
    }

    #[test]
    fn bad_mutability_reports_the_global_type_frame() {
        let log = DiagnosticLog::new();
        let mut cx = Context::new(Features::mvp(), &log);
        let bytes = [0x7F, 0x02];
        let mut cur = ByteCursor::new(Span::new(&bytes));

        let err = GlobalType::decode(&mut cur, &mut cx).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed {
                offset: 1,
                reason: Malformed::InvalidMarker {
                    what: "mutability",
                    byte: 0x02,
                    ..
                }
            }
        ));
        assert_eq!(cur.position(), 1);
        assert!(cx.frames().is_empty());

        let entries = log.into_entries();
        assert_eq!(
            entries[0].context,
            vec![Frame {
                label: "global type",
                offset: 0
            }]
        );
    }
}
