//! Section framing and the entries that module sections are made of.
//!
//! Everything here borrows from the input buffer: names are `&str` slices and
//! payloads, bodies and data segments are [`Span`]s.
use super::instruction::Instruction;
use super::types::{
    EventType, ExternalKind, GlobalType, MemoryType, ReferenceType, TableType,
    ValueType,
};
use super::Index;
use crate::span::Span;
use std::fmt;

/// Section ids as they appear in the binary format.
///
/// <https://webassembly.github.io/spec/core/binary/modules.html#sections>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum SectionId {
    Custom,
    Type,
    Import,
    Function,
    Table,
    Memory,
    Global,
    Export,
    Start,
    Element,
    Code,
    Data,
    DataCount,
    Event,
}

impl SectionId {
    pub fn name(self) -> &'static str {
        match self {
            SectionId::Custom => "custom",
            SectionId::Type => "type",
            SectionId::Import => "import",
            SectionId::Function => "function",
            SectionId::Table => "table",
            SectionId::Memory => "memory",
            SectionId::Global => "global",
            SectionId::Export => "export",
            SectionId::Start => "start",
            SectionId::Element => "element",
            SectionId::Code => "code",
            SectionId::Data => "data",
            SectionId::DataCount => "data count",
            SectionId::Event => "event",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct KnownSection<'a> {
    pub id: SectionId,
    pub payload: Span<'a>,
}

/// Custom sections are intended to be used for debugging information or third-party
/// extensions. Their contents consist of a name followed by an uninterpreted payload.
///
/// <https://webassembly.github.io/spec/core/binary/modules.html#custom-section>
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct CustomSection<'a> {
    pub name: &'a str,
    pub payload: Span<'a>,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Section<'a> {
    Known(KnownSection<'a>),
    Custom(CustomSection<'a>),
}

impl<'a> Section<'a> {
    pub fn id(&self) -> SectionId {
        match self {
            Section::Known(known) => known.id,
            Section::Custom(_) => SectionId::Custom,
        }
    }

    /// The section contents following the id, length and (for custom sections) name.
    pub fn payload(&self) -> Span<'a> {
        match self {
            Section::Known(known) => known.payload,
            Section::Custom(custom) => custom.payload,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ImportDesc {
    Function(Index),
    Table(TableType),
    Memory(MemoryType),
    Global(GlobalType),
    Event(EventType),
}

impl ImportDesc {
    pub fn kind(&self) -> ExternalKind {
        match self {
            ImportDesc::Function(_) => ExternalKind::Function,
            ImportDesc::Table(_) => ExternalKind::Table,
            ImportDesc::Memory(_) => ExternalKind::Memory,
            ImportDesc::Global(_) => ExternalKind::Global,
            ImportDesc::Event(_) => ExternalKind::Event,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Import<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub desc: ImportDesc,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Export<'a> {
    pub name: &'a str,
    pub kind: ExternalKind,
    pub index: Index,
}

/// An entry of the function section: the signature of a defined function.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Function {
    pub type_index: Index,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Table {
    pub table_type: TableType,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Memory {
    pub memory_type: MemoryType,
}

/// A constant expression: its instructions, without the terminating `end`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ConstantExpression {
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Global {
    pub global_type: GlobalType,
    pub init: ConstantExpression,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Event {
    pub event_type: EventType,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Start {
    pub function_index: Index,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct DataCount {
    pub count: u32,
}

#[derive(Debug, PartialEq, Clone)]
pub enum SegmentMode {
    Active {
        index: Index,
        offset: ConstantExpression,
    },
    Passive,
    Declared,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ElementList {
    Indexes {
        kind: ExternalKind,
        list: Vec<Index>,
    },
    Expressions {
        elem_type: ReferenceType,
        list: Vec<ConstantExpression>,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub struct ElementSegment {
    pub mode: SegmentMode,
    pub elements: ElementList,
}

#[derive(Debug, PartialEq, Clone)]
pub struct DataSegment<'a> {
    pub mode: SegmentMode,
    pub init: Span<'a>,
}

/// A run of `count` locals sharing one type.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Locals {
    pub count: u32,
    pub value_type: ValueType,
}

/// An instruction stream that is decoded on demand.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Expression<'a> {
    pub data: Span<'a>,
}

/// An entry of the code section. The body runs up to and including the
/// function's final `end`.
#[derive(Debug, PartialEq, Clone)]
pub struct Code<'a> {
    pub locals: Vec<Locals>,
    pub body: Expression<'a>,
}

/// Subsection ids of the `name` custom section.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum NameSubsectionId {
    ModuleName,
    FunctionNames,
    LocalNames,
    /// Later additions (labels, types, fields and the like), kept unread.
    Other(u8),
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct NameSubsection<'a> {
    pub id: NameSubsectionId,
    pub payload: Span<'a>,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct NameAssoc<'a> {
    pub index: Index,
    pub name: &'a str,
}
