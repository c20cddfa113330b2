//! Instruction decoding.
//!
//! An instruction is an opcode followed by exactly the immediate fields its
//! [`ImmediateKind`] names. Opcodes are looked up in the static table; unknown
//! ones fail with `InvalidOpcode` and known ones behind a disabled proposal
//! fail with `FeatureDisabled`.
//!
//! <https://webassembly.github.io/spec/core/binary/instructions.html>
use super::helpers::{read_span, read_vector};
use super::integer::{read_f32, read_f64, read_s32, read_s64, read_u32, read_u8, read_v128};
use super::lazy::LazySequence;
use super::{Decode, DecodeError, DecodeResult, Malformed};
use crate::core::types::{BlockType, ReferenceType, ValueType};
use crate::core::{
    BrTableImmediate, ConstantExpression, Expression, Immediate, ImmediateKind, Instruction,
    MemArg, Opcode,
};
use crate::diagnostics::Context;
use crate::span::ByteCursor;

/// The instructions of a function body or other expression, decoded one per
/// pull until its bytes run out.
pub type LazyExpression<'a, 'd> = LazySequence<'a, 'd, Instruction>;

impl<'a, 'd> LazyExpression<'a, 'd> {
    pub fn from_expression(expr: Expression<'a>, cx: &Context<'d>) -> Self {
        LazySequence::new(expr.data, cx)
    }
}

fn read_opcode(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<Opcode> {
    let start = *cur;
    let byte = read_u8(cur, cx)?;
    if byte != Opcode::MISC_PREFIX && byte != Opcode::SIMD_PREFIX {
        return Ok(Opcode::new(byte));
    }

    let code = match read_u32(cur, cx) {
        Ok(code) => code,
        Err(err) => {
            *cur = start;
            return Err(err);
        }
    };
    // no sub-opcode this wide exists under any prefix
    if code > 0x00FF_FFFF {
        *cur = start;
        return cx.fail(DecodeError::InvalidOpcode {
            offset: start.position(),
            opcode: Opcode::new(byte),
        });
    }
    Ok(Opcode::prefixed(byte, code))
}

fn read_memarg(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<MemArg> {
    let align_log2 = read_u32(cur, cx)?;
    let offset = read_u32(cur, cx)?;
    Ok(MemArg { align_log2, offset })
}

fn read_lanes(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<[u8; 16]> {
    let span = read_span(cur, 16, cx)?;
    let mut lanes = [0u8; 16];
    lanes.copy_from_slice(span.as_bytes());
    Ok(lanes)
}

fn read_immediate(
    kind: ImmediateKind,
    cur: &mut ByteCursor<'_>,
    cx: &mut Context<'_>,
) -> DecodeResult<Immediate> {
    Ok(match kind {
        ImmediateKind::None => Immediate::None,
        ImmediateKind::BlockType => Immediate::BlockType(BlockType::decode(cur, cx)?),
        ImmediateKind::Index => Immediate::Index(read_u32(cur, cx)?),
        ImmediateKind::CallIndirect => {
            let type_index = read_u32(cur, cx)?;
            // a reserved 0x00 byte before reference types, which reads as table 0
            let table_index = read_u32(cur, cx)?;
            Immediate::CallIndirect {
                type_index,
                table_index,
            }
        }
        ImmediateKind::BrTable => {
            let targets = read_vector::<u32>(cur, cx)?;
            let default_target = read_u32(cur, cx)?;
            Immediate::BrTable(BrTableImmediate {
                targets,
                default_target,
            })
        }
        ImmediateKind::BrOnExn => {
            let target = read_u32(cur, cx)?;
            let event_index = read_u32(cur, cx)?;
            Immediate::BrOnExn {
                target,
                event_index,
            }
        }
        ImmediateKind::U8 => Immediate::U8(read_u8(cur, cx)?),
        ImmediateKind::S32 => Immediate::S32(read_s32(cur, cx)?),
        ImmediateKind::S64 => Immediate::S64(read_s64(cur, cx)?),
        ImmediateKind::F32 => Immediate::F32(read_f32(cur, cx)?),
        ImmediateKind::F64 => Immediate::F64(read_f64(cur, cx)?),
        ImmediateKind::V128 => Immediate::V128(read_v128(cur, cx)?),
        ImmediateKind::MemArg => Immediate::MemArg(read_memarg(cur, cx)?),
        ImmediateKind::MemArgLane => {
            let memarg = read_memarg(cur, cx)?;
            let lane = read_u8(cur, cx)?;
            Immediate::MemArgLane { memarg, lane }
        }
        ImmediateKind::Init => {
            let segment_index = read_u32(cur, cx)?;
            let dst_index = read_u32(cur, cx)?;
            Immediate::Init {
                segment_index,
                dst_index,
            }
        }
        ImmediateKind::Copy => {
            let dst_index = read_u32(cur, cx)?;
            let src_index = read_u32(cur, cx)?;
            Immediate::Copy {
                dst_index,
                src_index,
            }
        }
        ImmediateKind::Shuffle => Immediate::Shuffle(read_lanes(cur, cx)?),
        ImmediateKind::ValueTypes => Immediate::ValueTypes(read_vector::<ValueType>(cur, cx)?),
        ImmediateKind::ReferenceType => {
            Immediate::ReferenceType(ReferenceType::decode(cur, cx)?)
        }
    })
}

impl Decode<'_> for Instruction {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let start = *cur;
        let offset = cur.position();
        let opcode = read_opcode(cur, cx)?;

        let Some(info) = opcode.info() else {
            *cur = start;
            return cx.fail(DecodeError::InvalidOpcode { offset, opcode });
        };
        if let Some(feature) = info.feature
            && let Err(err) = cx.require(feature, info.name, offset)
        {
            *cur = start;
            return Err(err);
        }

        let immediate = read_immediate(info.immediate, cur, cx)?;
        tracing::trace!(offset, %opcode, "decoded instruction");
        Ok(Instruction { opcode, immediate })
    }
}

impl Decode<'_> for ConstantExpression {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("constant expression", cur.position());
        let mut instructions = Vec::new();
        loop {
            if cur.is_empty() {
                return cx.fail(DecodeError::malformed(
                    cur.position(),
                    Malformed::UnterminatedExpression,
                ));
            }
            let instr = Instruction::decode(cur, &mut cx)?;
            if instr.opcode == Opcode::END {
                return Ok(ConstantExpression { instructions });
            }
            instructions.push(instr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ErrorKind;
    use crate::diagnostics::{DiagnosticLog, NopDiagnostics};
    use crate::features::{Feature, Features};
    use crate::span::Span;
    use pretty_assertions::assert_eq;

    fn decode_one(bytes: &[u8], features: Features) -> (DecodeResult<Instruction>, usize) {
        let mut cx = Context::new(features, &NopDiagnostics);
        let mut cur = ByteCursor::new(Span::new(bytes));
        (Instruction::decode(&mut cur, &mut cx), cur.position())
    }

    #[test]
    fn decodes_each_immediate_shape() {
        let cases: Vec<(Vec<u8>, Instruction)> = vec![
            (vec![0x01], Instruction::bare(Opcode::NOP)),
            (
                vec![0x02, 0x40],
                Instruction::new(Opcode::BLOCK, Immediate::BlockType(BlockType::Void)),
            ),
            (vec![0x0C, 0x02], Instruction::new(Opcode::BR, Immediate::Index(2))),
            (
                vec![0x11, 0x03, 0x00],
                Instruction::new(
                    Opcode::new(0x11),
                    Immediate::CallIndirect {
                        type_index: 3,
                        table_index: 0,
                    },
                ),
            ),
            (
                vec![0x0E, 0x02, 0x00, 0x01, 0x02],
                Instruction::new(
                    Opcode::BR_TABLE,
                    Immediate::BrTable(BrTableImmediate {
                        targets: vec![0, 1],
                        default_target: 2,
                    }),
                ),
            ),
            (
                vec![0x41, 0x7F],
                Instruction::new(Opcode::I32_CONST, Immediate::S32(-1)),
            ),
            (
                vec![0x42, 0x80, 0x01],
                Instruction::new(Opcode::new(0x42), Immediate::S64(128)),
            ),
            (
                [vec![0x44], 0.5f64.to_le_bytes().to_vec()].concat(),
                Instruction::new(Opcode::new(0x44), Immediate::F64(0.5)),
            ),
            (
                vec![0x28, 0x02, 0x08],
                Instruction::new(
                    Opcode::new(0x28),
                    Immediate::MemArg(MemArg {
                        align_log2: 2,
                        offset: 8,
                    }),
                ),
            ),
            (
                vec![0x3F, 0x00],
                Instruction::new(Opcode::new(0x3F), Immediate::U8(0)),
            ),
            (
                vec![0xFC, 0x0A, 0x00, 0x00],
                Instruction::new(
                    Opcode::prefixed(0xFC, 10),
                    Immediate::Copy {
                        dst_index: 0,
                        src_index: 0,
                    },
                ),
            ),
            (
                vec![0xFC, 0x08, 0x01, 0x00],
                Instruction::new(
                    Opcode::prefixed(0xFC, 8),
                    Immediate::Init {
                        segment_index: 1,
                        dst_index: 0,
                    },
                ),
            ),
            (
                vec![0x1C, 0x01, 0x7F],
                Instruction::new(
                    Opcode::new(0x1C),
                    Immediate::ValueTypes(vec![ValueType::I32]),
                ),
            ),
            (
                vec![0xD0, 0x70],
                Instruction::new(
                    Opcode::new(0xD0),
                    Immediate::ReferenceType(ReferenceType::Funcref),
                ),
            ),
            (
                vec![0x0A, 0x01, 0x00],
                Instruction::new(
                    Opcode::new(0x0A),
                    Immediate::BrOnExn {
                        target: 1,
                        event_index: 0,
                    },
                ),
            ),
            (
                [vec![0xFD, 0x0D], (0u8..16).collect::<Vec<_>>()].concat(),
                Instruction::new(
                    Opcode::prefixed(0xFD, 13),
                    Immediate::Shuffle([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
                ),
            ),
            (
                vec![0xFD, 0x54, 0x00, 0x00, 0x03],
                Instruction::new(
                    Opcode::prefixed(0xFD, 84),
                    Immediate::MemArgLane {
                        memarg: MemArg {
                            align_log2: 0,
                            offset: 0,
                        },
                        lane: 3,
                    },
                ),
            ),
        ];

        for (bytes, expected) in cases {
            let (result, pos) = decode_one(&bytes, Features::all());
            assert_eq!(result, Ok(expected));
            assert_eq!(pos, bytes.len());
        }
    }

    #[test]
    fn unknown_opcode_is_invalid() {
        let (result, pos) = decode_one(&[0x14], Features::all());
        assert_eq!(
            result,
            Err(DecodeError::InvalidOpcode {
                offset: 0,
                opcode: Opcode::new(0x14)
            })
        );
        assert_eq!(pos, 0);

        let (result, _) = decode_one(&[0xFD, 0x9A, 0x01], Features::all());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidOpcode);
    }

    #[test]
    fn oversized_sub_opcode_is_invalid() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::all(), &log);
        let bytes = [0xFC, 0x80, 0x80, 0x80, 0x08];
        let mut expr = LazyExpression::new(Span::new(&bytes), &cx);

        assert_eq!(expr.next(), None);
        assert_eq!(expr.position(), 0);
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ErrorKind::InvalidOpcode);
        assert_eq!(entries[0].offset, 0);
    }

    #[test]
    fn gated_opcodes_need_their_feature() {
        let cases = [
            (vec![0x12, 0x00], Feature::TailCall),
            (vec![0x06, 0x40], Feature::Exceptions),
            (vec![0xC0], Feature::SignExtension),
            (vec![0xFC, 0x00], Feature::SaturatingFloatToInt),
            (vec![0xFC, 0x0B, 0x00], Feature::BulkMemory),
            (vec![0xD1], Feature::ReferenceTypes),
            (vec![0xFD, 0x0F], Feature::Simd),
        ];

        for (bytes, feature) in cases {
            let (result, pos) = decode_one(&bytes, Features::mvp());
            assert_eq!(
                result,
                Err(DecodeError::FeatureDisabled {
                    offset: 0,
                    what: bytes_name(&bytes),
                    feature,
                })
            );
            assert_eq!(pos, 0);

            let (result, pos) = decode_one(&bytes, Features::mvp().with(feature));
            assert!(result.is_ok(), "{feature} should enable {bytes:02X?}");
            assert_eq!(pos, bytes.len());
        }
    }

    fn bytes_name(bytes: &[u8]) -> &'static str {
        let opcode = match bytes {
            [prefix @ (0xFC | 0xFD), code, ..] => Opcode::prefixed(*prefix, u32::from(*code)),
            [code, ..] => Opcode::new(*code),
            [] => unreachable!(),
        };
        opcode.name().unwrap()
    }

    #[test]
    fn lazy_expression_stops_at_first_failure() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp(), &log);
        let bytes = [0x01, 0x41, 0x05, 0xFF, 0x01, 0x0B];
        let mut expr = LazyExpression::new(Span::new(&bytes), &cx);

        assert_eq!(expr.next(), Some(Instruction::bare(Opcode::NOP)));
        assert_eq!(
            expr.next(),
            Some(Instruction::new(Opcode::I32_CONST, Immediate::S32(5)))
        );
        assert_eq!(expr.position(), 3);
        assert_eq!(expr.next(), None);
        assert!(expr.has_failed());
        assert_eq!(expr.next(), None);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].kind, ErrorKind::InvalidOpcode);
    }

    #[test]
    fn constant_expression_requires_end() {
        let mut cx = Context::new(Features::mvp(), &NopDiagnostics);

        let bytes = [0x41, 0x2A, 0x0B];
        let mut cur = ByteCursor::new(Span::new(&bytes));
        assert_eq!(
            ConstantExpression::decode(&mut cur, &mut cx),
            Ok(ConstantExpression {
                instructions: vec![Instruction::new(Opcode::I32_CONST, Immediate::S32(42))]
            })
        );

        let bytes = [0x41, 0x2A];
        let mut cur = ByteCursor::new(Span::new(&bytes));
        assert_eq!(
            ConstantExpression::decode(&mut cur, &mut cx),
            Err(DecodeError::malformed(2, Malformed::UnterminatedExpression))
        );
    }
}
