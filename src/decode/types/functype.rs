use crate::core::types::{FunctionType, ValueType};
use crate::decode::helpers::read_vector;
use crate::decode::integer::read_u8;
use crate::decode::{Decode, DecodeError, DecodeResult, Malformed};
use crate::diagnostics::Context;
use crate::features::Feature;
use crate::span::ByteCursor;

const MARKER_BYTE: u8 = 0x60;

impl Decode<'_> for FunctionType {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("function type", cur.position());

        let marker_at = *cur;
        let b = read_u8(cur, &cx)?;
        if b != MARKER_BYTE {
            *cur = marker_at;
            return cx.fail(DecodeError::malformed(
                marker_at.position(),
                Malformed::InvalidMarker {
                    what: "function type",
                    expected: format!("{MARKER_BYTE:#04X}"),
                    byte: b,
                },
            ));
        }

        let params = read_vector::<ValueType>(cur, &mut cx)?;
        let results_at = cur.position();
        let results = read_vector::<ValueType>(cur, &mut cx)?;
        if results.len() > 1 {
            cx.require(Feature::MultiValue, "multiple results", results_at)?;
        }

        Ok(FunctionType { params, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ErrorKind;
    use crate::diagnostics::NopDiagnostics;
    use crate::features::Features;
    use crate::span::Span;

    fn decode(bytes: &[u8], features: Features) -> DecodeResult<FunctionType> {
        let mut cx = Context::new(features, &NopDiagnostics);
        FunctionType::decode(&mut ByteCursor::new(Span::new(bytes)), &mut cx)
    }

    #[test]
    fn params_and_single_result() {
        assert_eq!(
            decode(&[0x60, 0x02, 0x7F, 0x7E, 0x01, 0x7D], Features::mvp()),
            Ok(FunctionType {
                params: vec![ValueType::I32, ValueType::I64],
                results: vec![ValueType::F32],
            })
        );
    }

    #[test]
    fn multiple_results_need_multi_value() {
        let bytes = [0x60, 0x00, 0x02, 0x7F, 0x7F];
        assert_eq!(
            decode(&bytes, Features::mvp()).unwrap_err().kind(),
            ErrorKind::FeatureDisabled
        );
        assert!(decode(&bytes, Features::mvp().with(Feature::MultiValue)).is_ok());
    }

    #[test]
    fn wrong_marker() {
        assert_eq!(
            decode(&[0x61, 0x00, 0x00], Features::mvp()).unwrap_err().kind(),
            ErrorKind::Malformed
        );
    }
}
