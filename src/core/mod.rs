//! The decoded representation of a WebAssembly module.
pub mod types;

mod instruction;
pub use instruction::{BrTableImmediate, Immediate, ImmediateKind, Instruction, MemArg, Opcode};

mod module;
pub use module::{
    Code, ConstantExpression, CustomSection, DataCount, DataSegment, ElementList,
    ElementSegment, Event, Export, Expression, Function, Global, Import, ImportDesc,
    KnownSection, Locals, Memory, NameAssoc, NameSubsection, NameSubsectionId, Section,
    SectionId, SegmentMode, Start, Table,
};

pub(crate) mod opcodes;
pub use opcodes::{OpcodeInfo, all as all_opcodes};

/// Indices into the module's index spaces (types, functions, tables, ...).
pub type Index = u32;
