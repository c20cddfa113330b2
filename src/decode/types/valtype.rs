use crate::core::types::{ReferenceType, ValueType};
use crate::decode::{Decode, DecodeResult, FromMarkerByte};
use crate::diagnostics::Context;
use crate::features::Feature;
use crate::span::ByteCursor;
use phf::phf_ordered_map;

// Valid marker bytes for [ValueType].
#[expect(non_upper_case_globals)]
static ValueType_MARKERS: phf::OrderedMap<u8, ValueType> = phf_ordered_map! {
    0x7Fu8 => ValueType::I32,
    0x7Eu8 => ValueType::I64,
    0x7Du8 => ValueType::F32,
    0x7Cu8 => ValueType::F64,
    0x7Bu8 => ValueType::V128,
    0x70u8 => ValueType::Ref(ReferenceType::Funcref),
    0x6Fu8 => ValueType::Ref(ReferenceType::Externref),
    0x68u8 => ValueType::Ref(ReferenceType::Exnref),
};

impl FromMarkerByte for ValueType {
    const WHAT: &'static str = "value type";

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &ValueType_MARKERS
    }
}

impl ValueType {
    /// The proposal that introduced this type, if it is not part of the MVP.
    pub fn required_feature(self) -> Option<Feature> {
        match self {
            ValueType::I32 | ValueType::I64 | ValueType::F32 | ValueType::F64 => None,
            ValueType::V128 => Some(Feature::Simd),
            ValueType::Ref(ReferenceType::Funcref | ReferenceType::Externref) => {
                Some(Feature::ReferenceTypes)
            }
            ValueType::Ref(ReferenceType::Exnref) => Some(Feature::Exceptions),
        }
    }
}

impl Decode<'_> for ValueType {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut probe = *cur;
        let value_type = Self::decode_marker(&mut probe, cx)?;
        if let Some(feature) = value_type.required_feature() {
            cx.require(feature, "value type", cur.position())?;
        }
        *cur = probe;
        Ok(value_type)
    }
}

// Valid marker bytes for [ReferenceType].
#[expect(non_upper_case_globals)]
static ReferenceType_MARKERS: phf::OrderedMap<u8, ReferenceType> = phf_ordered_map! {
    0x70u8 => ReferenceType::Funcref,
    0x6Fu8 => ReferenceType::Externref,
    0x68u8 => ReferenceType::Exnref,
};

impl FromMarkerByte for ReferenceType {
    const WHAT: &'static str = "reference type";

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &ReferenceType_MARKERS
    }
}

impl Decode<'_> for ReferenceType {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut probe = *cur;
        let ref_type = Self::decode_marker(&mut probe, cx)?;
        // funcref tables are part of the MVP
        match ref_type {
            ReferenceType::Funcref => {}
            ReferenceType::Externref => {
                cx.require(Feature::ReferenceTypes, "externref", cur.position())?
            }
            ReferenceType::Exnref => cx.require(Feature::Exceptions, "exnref", cur.position())?,
        }
        *cur = probe;
        Ok(ref_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ErrorKind;
    use crate::diagnostics::NopDiagnostics;
    use crate::features::Features;
    use crate::span::Span;

    fn decode<'a, T: Decode<'a>>(bytes: &'a [u8], features: Features) -> (DecodeResult<T>, usize) {
        let mut cx = Context::new(features, &NopDiagnostics);
        let mut cur = ByteCursor::new(Span::new(bytes));
        (T::decode(&mut cur, &mut cx), cur.position())
    }

    #[test]
    fn numeric_types_are_always_available() {
        assert_eq!(decode(&[0x7F], Features::mvp()), (Ok(ValueType::I32), 1));
        assert_eq!(decode(&[0x7C], Features::mvp()), (Ok(ValueType::F64), 1));
    }

    #[test]
    fn proposal_types_are_gated() {
        let (result, pos) = decode::<ValueType>(&[0x7B], Features::mvp());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::FeatureDisabled);
        assert_eq!(pos, 0);

        let simd = Features::mvp().with(Feature::Simd);
        assert_eq!(decode(&[0x7B], simd), (Ok(ValueType::V128), 1));

        let (result, _) = decode::<ValueType>(&[0x6F], Features::mvp());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::FeatureDisabled);
    }

    #[test]
    fn unknown_marker_is_malformed() {
        let (result, pos) = decode::<ValueType>(&[0x40], Features::all());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Malformed);
        assert_eq!(pos, 0);
    }

    #[test]
    fn funcref_tables_need_no_feature() {
        assert_eq!(
            decode(&[0x70], Features::mvp()),
            (Ok(ReferenceType::Funcref), 1)
        );
        let (result, _) = decode::<ReferenceType>(&[0x7F], Features::all());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Malformed);
    }
}
