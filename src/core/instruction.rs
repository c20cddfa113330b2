use super::Index;
use super::opcodes::{self, OpcodeInfo};
use super::types::{BlockType, ReferenceType, ValueType};
use std::fmt;

/// A numeric instruction identifier.
///
/// Single-byte opcodes are stored as-is; prefixed opcodes (`0xFC`, `0xFD`)
/// keep the prefix byte in the top 8 bits and the LEB128-encoded sub-opcode in
/// the low 24 bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(u32);

impl Opcode {
    pub const UNREACHABLE: Opcode = Opcode::new(0x00);
    pub const NOP: Opcode = Opcode::new(0x01);
    pub const BLOCK: Opcode = Opcode::new(0x02);
    pub const LOOP: Opcode = Opcode::new(0x03);
    pub const IF: Opcode = Opcode::new(0x04);
    pub const ELSE: Opcode = Opcode::new(0x05);
    pub const TRY: Opcode = Opcode::new(0x06);
    pub const CATCH: Opcode = Opcode::new(0x07);
    pub const THROW: Opcode = Opcode::new(0x08);
    pub const RETHROW: Opcode = Opcode::new(0x09);
    pub const BR_ON_EXN: Opcode = Opcode::new(0x0A);
    pub const END: Opcode = Opcode::new(0x0B);
    pub const BR: Opcode = Opcode::new(0x0C);
    pub const BR_IF: Opcode = Opcode::new(0x0D);
    pub const BR_TABLE: Opcode = Opcode::new(0x0E);
    pub const RETURN: Opcode = Opcode::new(0x0F);
    pub const CALL: Opcode = Opcode::new(0x10);
    pub const RETURN_CALL: Opcode = Opcode::new(0x12);
    pub const RETURN_CALL_INDIRECT: Opcode = Opcode::new(0x13);
    pub const DROP: Opcode = Opcode::new(0x1A);
    pub const LOCAL_GET: Opcode = Opcode::new(0x20);
    pub const I32_CONST: Opcode = Opcode::new(0x41);
    pub const I32_ADD: Opcode = Opcode::new(0x6A);

    pub const MISC_PREFIX: u8 = 0xFC;
    pub const SIMD_PREFIX: u8 = 0xFD;

    pub const fn new(code: u8) -> Self {
        Self(code as u32)
    }

    /// Sub-opcodes wider than 24 bits are truncated.
    pub const fn prefixed(prefix: u8, code: u32) -> Self {
        Self(((prefix as u32) << 24) | (code & 0x00FF_FFFF))
    }

    pub fn prefix(self) -> Option<u8> {
        match (self.0 >> 24) as u8 {
            0 => None,
            p => Some(p),
        }
    }

    pub fn code(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    pub(crate) fn key(self) -> u32 {
        self.0
    }

    /// The static table entry, if this opcode is known at all.
    pub fn info(self) -> Option<&'static OpcodeInfo> {
        opcodes::lookup(self)
    }

    pub fn name(self) -> Option<&'static str> {
        self.info().map(|info| info.name)
    }

    /// The raw byte encoding, e.g. `0x0B` or `0xFD 0x0C`.
    pub fn encoding(self) -> impl fmt::Display {
        Encoding(self)
    }
}

struct Encoding(Opcode);

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.prefix() {
            Some(prefix) => write!(f, "{prefix:#04X} {:#04X}", self.0.code()),
            None => write!(f, "{:#04X}", self.0.code()),
        }
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Opcode({name})"),
            None => write!(f, "Opcode({})", self.encoding()),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "<unknown {}>", self.encoding()),
        }
    }
}

/// Alignment (as a power of two) and constant offset of a memory access.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct MemArg {
    pub align_log2: u32,
    pub offset: u32,
}

impl fmt::Display for MemArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset={}", self.offset)?;
        match 1u64.checked_shl(self.align_log2) {
            Some(align) => write!(f, " align={align}"),
            None => write!(f, " align=2**{}", self.align_log2),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BrTableImmediate {
    pub targets: Vec<Index>,
    pub default_target: Index,
}

/// The shape of an opcode's immediate, as listed in the opcode table.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ImmediateKind {
    None,
    BlockType,
    Index,
    CallIndirect,
    BrTable,
    BrOnExn,
    U8,
    S32,
    S64,
    F32,
    F64,
    V128,
    MemArg,
    MemArgLane,
    Init,
    Copy,
    Shuffle,
    ValueTypes,
    ReferenceType,
}

/// Operand data following an opcode. Exactly one shape per opcode.
#[derive(Debug, PartialEq, Clone)]
pub enum Immediate {
    None,
    BlockType(BlockType),
    Index(Index),
    CallIndirect {
        type_index: Index,
        table_index: Index,
    },
    BrTable(BrTableImmediate),
    BrOnExn {
        target: Index,
        event_index: Index,
    },
    U8(u8),
    S32(i32),
    S64(i64),
    F32(f32),
    F64(f64),
    V128([u8; 16]),
    MemArg(MemArg),
    MemArgLane {
        memarg: MemArg,
        lane: u8,
    },
    Init {
        segment_index: Index,
        dst_index: Index,
    },
    Copy {
        dst_index: Index,
        src_index: Index,
    },
    Shuffle([u8; 16]),
    ValueTypes(Vec<ValueType>),
    ReferenceType(ReferenceType),
}

impl Immediate {
    pub fn kind(&self) -> ImmediateKind {
        match self {
            Immediate::None => ImmediateKind::None,
            Immediate::BlockType(_) => ImmediateKind::BlockType,
            Immediate::Index(_) => ImmediateKind::Index,
            Immediate::CallIndirect { .. } => ImmediateKind::CallIndirect,
            Immediate::BrTable(_) => ImmediateKind::BrTable,
            Immediate::BrOnExn { .. } => ImmediateKind::BrOnExn,
            Immediate::U8(_) => ImmediateKind::U8,
            Immediate::S32(_) => ImmediateKind::S32,
            Immediate::S64(_) => ImmediateKind::S64,
            Immediate::F32(_) => ImmediateKind::F32,
            Immediate::F64(_) => ImmediateKind::F64,
            Immediate::V128(_) => ImmediateKind::V128,
            Immediate::MemArg(_) => ImmediateKind::MemArg,
            Immediate::MemArgLane { .. } => ImmediateKind::MemArgLane,
            Immediate::Init { .. } => ImmediateKind::Init,
            Immediate::Copy { .. } => ImmediateKind::Copy,
            Immediate::Shuffle(_) => ImmediateKind::Shuffle,
            Immediate::ValueTypes(_) => ImmediateKind::ValueTypes,
            Immediate::ReferenceType(_) => ImmediateKind::ReferenceType,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Immediate::None | Immediate::BlockType(BlockType::Void))
    }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Immediate::None => Ok(()),
            Immediate::BlockType(bt) => bt.fmt(f),
            Immediate::Index(i) => write!(f, "{i}"),
            Immediate::CallIndirect {
                type_index,
                table_index,
            } => write!(f, "{table_index} (type {type_index})"),
            Immediate::BrTable(table) => {
                for target in &table.targets {
                    write!(f, "{target} ")?;
                }
                write!(f, "{}", table.default_target)
            }
            Immediate::BrOnExn {
                target,
                event_index,
            } => write!(f, "{target} {event_index}"),
            Immediate::U8(v) => write!(f, "{v}"),
            Immediate::S32(v) => write!(f, "{v}"),
            Immediate::S64(v) => write!(f, "{v}"),
            Immediate::F32(v) => write!(f, "{v}"),
            Immediate::F64(v) => write!(f, "{v}"),
            Immediate::V128(bytes) => {
                f.write_str("i32x4")?;
                for lane in bytes.chunks_exact(4) {
                    let lane = u32::from_le_bytes([lane[0], lane[1], lane[2], lane[3]]);
                    write!(f, " {lane:#010x}")?;
                }
                Ok(())
            }
            Immediate::MemArg(memarg) => memarg.fmt(f),
            Immediate::MemArgLane { memarg, lane } => write!(f, "{memarg} {lane}"),
            Immediate::Init {
                segment_index,
                dst_index,
            } => write!(f, "{segment_index} {dst_index}"),
            Immediate::Copy {
                dst_index,
                src_index,
            } => write!(f, "{dst_index} {src_index}"),
            Immediate::Shuffle(lanes) => {
                let mut sep = "";
                for lane in lanes {
                    write!(f, "{sep}{lane}")?;
                    sep = " ";
                }
                Ok(())
            }
            Immediate::ValueTypes(types) => {
                f.write_str("(result")?;
                for t in types {
                    write!(f, " {t}")?;
                }
                f.write_str(")")
            }
            Immediate::ReferenceType(r) => r.fmt(f),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Instruction {
    pub opcode: Opcode,
    pub immediate: Immediate,
}

impl Instruction {
    pub fn new(opcode: Opcode, immediate: Immediate) -> Self {
        Self { opcode, immediate }
    }

    pub fn bare(opcode: Opcode) -> Self {
        Self::new(opcode, Immediate::None)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.opcode.fmt(f)?;
        if !self.immediate.is_blank() {
            write!(f, " {}", self.immediate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn opcode_names_and_encodings() {
        assert_eq!(Opcode::BLOCK.to_string(), "block");
        assert_eq!(Opcode::prefixed(0xFD, 12).to_string(), "v128.const");
        assert_eq!(Opcode::prefixed(0xFC, 8).prefix(), Some(0xFC));
        assert_eq!(Opcode::prefixed(0xFC, 8).code(), 8);
        assert_eq!(Opcode::new(0xFF).to_string(), "<unknown 0xFF>");
        assert_eq!(Opcode::prefixed(0xFD, 0x0C).encoding().to_string(), "0xFD 0x0C");
    }

    #[test]
    fn instructions_render_with_immediates() {
        let cases = [
            (Instruction::bare(Opcode::NOP), "nop"),
            (
                Instruction::new(Opcode::BLOCK, Immediate::BlockType(BlockType::Void)),
                "block",
            ),
            (
                Instruction::new(
                    Opcode::LOOP,
                    Immediate::BlockType(BlockType::Value(ValueType::I32)),
                ),
                "loop (result i32)",
            ),
            (
                Instruction::new(Opcode::I32_CONST, Immediate::S32(-3)),
                "i32.const -3",
            ),
            (
                Instruction::new(
                    Opcode::BR_TABLE,
                    Immediate::BrTable(BrTableImmediate {
                        targets: vec![0, 1],
                        default_target: 2,
                    }),
                ),
                "br_table 0 1 2",
            ),
            (
                Instruction::new(
                    Opcode::new(0x28),
                    Immediate::MemArg(MemArg {
                        align_log2: 2,
                        offset: 16,
                    }),
                ),
                "i32.load offset=16 align=4",
            ),
        ];

        for (instr, text) in cases {
            assert_eq!(instr.to_string(), text);
        }
    }
}
