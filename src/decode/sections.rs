//! Readers for the contents of known sections.
//!
//! Each reader takes a framed [`KnownSection`] and returns a count-prefixed
//! [`LazySection`] over its entries; start and data count sections hold a
//! single value and are decoded eagerly.
//!
//! <https://webassembly.github.io/spec/core/binary/modules.html>
use super::helpers::{
    expect_consumed, read_count, read_length_prefixed, read_name, read_span, read_vector,
};
use super::integer::{read_u32, read_u8};
use super::lazy::LazySection;
use super::{Decode, DecodeError, DecodeResult, Malformed};
use crate::core::types::{
    EventType, ExternalKind, FunctionType, GlobalType, MemoryType, ReferenceType, TableType,
    ValueType,
};
use crate::core::{
    Code, ConstantExpression, DataCount, DataSegment, ElementList, ElementSegment, Event,
    Export, Expression, Function, Global, Import, ImportDesc, KnownSection, Locals, Memory,
    SegmentMode, Start, Table,
};
use crate::diagnostics::Context;
use crate::features::Feature;
use crate::span::ByteCursor;

pub type LazyTypeSection<'a, 'd> = LazySection<'a, 'd, FunctionType>;
pub type LazyImportSection<'a, 'd> = LazySection<'a, 'd, Import<'a>>;
pub type LazyFunctionSection<'a, 'd> = LazySection<'a, 'd, Function>;
pub type LazyTableSection<'a, 'd> = LazySection<'a, 'd, Table>;
pub type LazyMemorySection<'a, 'd> = LazySection<'a, 'd, Memory>;
pub type LazyGlobalSection<'a, 'd> = LazySection<'a, 'd, Global>;
pub type LazyEventSection<'a, 'd> = LazySection<'a, 'd, Event>;
pub type LazyExportSection<'a, 'd> = LazySection<'a, 'd, Export<'a>>;
pub type LazyElementSection<'a, 'd> = LazySection<'a, 'd, ElementSegment>;
pub type LazyCodeSection<'a, 'd> = LazySection<'a, 'd, Code<'a>>;
pub type LazyDataSection<'a, 'd> = LazySection<'a, 'd, DataSegment<'a>>;

pub fn read_type_section<'a, 'd>(sec: KnownSection<'a>, cx: &Context<'d>) -> LazyTypeSection<'a, 'd> {
    LazySection::new(sec.payload, "type section", cx)
}

pub fn read_import_section<'a, 'd>(
    sec: KnownSection<'a>,
    cx: &Context<'d>,
) -> LazyImportSection<'a, 'd> {
    LazySection::new(sec.payload, "import section", cx)
}

pub fn read_function_section<'a, 'd>(
    sec: KnownSection<'a>,
    cx: &Context<'d>,
) -> LazyFunctionSection<'a, 'd> {
    LazySection::new(sec.payload, "function section", cx)
}

pub fn read_table_section<'a, 'd>(
    sec: KnownSection<'a>,
    cx: &Context<'d>,
) -> LazyTableSection<'a, 'd> {
    LazySection::new(sec.payload, "table section", cx)
}

pub fn read_memory_section<'a, 'd>(
    sec: KnownSection<'a>,
    cx: &Context<'d>,
) -> LazyMemorySection<'a, 'd> {
    LazySection::new(sec.payload, "memory section", cx)
}

pub fn read_global_section<'a, 'd>(
    sec: KnownSection<'a>,
    cx: &Context<'d>,
) -> LazyGlobalSection<'a, 'd> {
    LazySection::new(sec.payload, "global section", cx)
}

/// Fails up front, yielding nothing, unless exceptions are enabled.
pub fn read_event_section<'a, 'd>(
    sec: KnownSection<'a>,
    cx: &Context<'d>,
) -> LazyEventSection<'a, 'd> {
    if cx
        .require(Feature::Exceptions, "event section", sec.payload.begin())
        .is_err()
    {
        return LazySection::failed(sec.payload, "event section", cx);
    }
    LazySection::new(sec.payload, "event section", cx)
}

pub fn read_export_section<'a, 'd>(
    sec: KnownSection<'a>,
    cx: &Context<'d>,
) -> LazyExportSection<'a, 'd> {
    LazySection::new(sec.payload, "export section", cx)
}

pub fn read_start_section(sec: KnownSection<'_>, cx: &Context<'_>) -> Option<Start> {
    let cx = cx.with_frame("start section", sec.payload.begin());
    let mut cur = ByteCursor::new(sec.payload);
    let function_index = read_u32(&mut cur, &cx).ok()?;
    // reported, but the index itself is sound
    let _ = expect_consumed(&cur, "start section", &cx);
    Some(Start { function_index })
}

pub fn read_element_section<'a, 'd>(
    sec: KnownSection<'a>,
    cx: &Context<'d>,
) -> LazyElementSection<'a, 'd> {
    LazySection::new(sec.payload, "element section", cx)
}

/// Requires bulk memory.
pub fn read_data_count_section(sec: KnownSection<'_>, cx: &Context<'_>) -> Option<DataCount> {
    let cx = cx.with_frame("data count section", sec.payload.begin());
    cx.require(Feature::BulkMemory, "data count section", sec.payload.begin())
        .ok()?;
    let mut cur = ByteCursor::new(sec.payload);
    let count = read_u32(&mut cur, &cx).ok()?;
    let _ = expect_consumed(&cur, "data count section", &cx);
    Some(DataCount { count })
}

pub fn read_code_section<'a, 'd>(sec: KnownSection<'a>, cx: &Context<'d>) -> LazyCodeSection<'a, 'd> {
    LazySection::new(sec.payload, "code section", cx)
}

pub fn read_data_section<'a, 'd>(sec: KnownSection<'a>, cx: &Context<'d>) -> LazyDataSection<'a, 'd> {
    LazySection::new(sec.payload, "data section", cx)
}

impl<'a> Decode<'a> for Import<'a> {
    fn decode(cur: &mut ByteCursor<'a>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("import", cur.position());
        let module = read_name(cur, &cx)?;
        let name = read_name(cur, &cx)?;
        let desc = match ExternalKind::decode(cur, &mut cx)? {
            ExternalKind::Function => ImportDesc::Function(read_u32(cur, &cx)?),
            ExternalKind::Table => ImportDesc::Table(TableType::decode(cur, &mut cx)?),
            ExternalKind::Memory => ImportDesc::Memory(MemoryType::decode(cur, &mut cx)?),
            ExternalKind::Global => ImportDesc::Global(GlobalType::decode(cur, &mut cx)?),
            ExternalKind::Event => ImportDesc::Event(EventType::decode(cur, &mut cx)?),
        };
        Ok(Import { module, name, desc })
    }
}

impl<'a> Decode<'a> for Export<'a> {
    fn decode(cur: &mut ByteCursor<'a>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("export", cur.position());
        let name = read_name(cur, &cx)?;
        let kind = ExternalKind::decode(cur, &mut cx)?;
        let index = read_u32(cur, &cx)?;
        Ok(Export { name, kind, index })
    }
}

impl Decode<'_> for Function {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let type_index = read_u32(cur, cx)?;
        Ok(Function { type_index })
    }
}

impl Decode<'_> for Table {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let table_type = TableType::decode(cur, cx)?;
        Ok(Table { table_type })
    }
}

impl Decode<'_> for Memory {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let memory_type = MemoryType::decode(cur, cx)?;
        Ok(Memory { memory_type })
    }
}

impl Decode<'_> for Global {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("global", cur.position());
        let global_type = GlobalType::decode(cur, &mut cx)?;
        let init = ConstantExpression::decode(cur, &mut cx)?;
        Ok(Global { global_type, init })
    }
}

impl Decode<'_> for Event {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let event_type = EventType::decode(cur, cx)?;
        Ok(Event { event_type })
    }
}

/// The only element kind: function references.
fn read_element_kind(cur: &mut ByteCursor<'_>, cx: &Context<'_>) -> DecodeResult<ExternalKind> {
    let start = *cur;
    match read_u8(cur, cx)? {
        0x00 => Ok(ExternalKind::Function),
        byte => {
            *cur = start;
            cx.fail(DecodeError::malformed(
                start.position(),
                Malformed::InvalidMarker {
                    what: "element kind",
                    expected: "0x00".to_owned(),
                    byte,
                },
            ))
        }
    }
}

impl Decode<'_> for ElementSegment {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("element segment", cur.position());

        let flags_at = cur.position();
        let flags = read_u32(cur, &cx)?;
        if flags > 7 {
            return cx.fail(DecodeError::malformed(
                flags_at,
                Malformed::InvalidMarker {
                    what: "element segment flags",
                    expected: "0x00 to 0x07".to_owned(),
                    byte: flags.min(0xFF) as u8,
                },
            ));
        }
        if flags != 0 {
            cx.require(Feature::BulkMemory, "element segment flags", flags_at)?;
        }

        // bit 0: passive or declared; bit 1: explicit table index (active)
        // or declared (otherwise); bit 2: expressions instead of indices
        let passive_or_declared = flags & 0b001 != 0;
        let explicit_or_declared = flags & 0b010 != 0;
        let uses_expressions = flags & 0b100 != 0;

        let mode = if passive_or_declared {
            if explicit_or_declared {
                SegmentMode::Declared
            } else {
                SegmentMode::Passive
            }
        } else {
            let index = if explicit_or_declared {
                read_u32(cur, &cx)?
            } else {
                0
            };
            let offset = ConstantExpression::decode(cur, &mut cx)?;
            SegmentMode::Active { index, offset }
        };

        // flags 0 and 4 imply funcref and carry no kind or type byte
        let has_type = flags & 0b011 != 0;
        let elements = if uses_expressions {
            let elem_type = if has_type {
                ReferenceType::decode(cur, &mut cx)?
            } else {
                ReferenceType::Funcref
            };
            let list = read_vector::<ConstantExpression>(cur, &mut cx)?;
            ElementList::Expressions { elem_type, list }
        } else {
            let kind = if has_type {
                read_element_kind(cur, &cx)?
            } else {
                ExternalKind::Function
            };
            let list = read_vector::<u32>(cur, &mut cx)?;
            ElementList::Indexes { kind, list }
        };

        Ok(ElementSegment { mode, elements })
    }
}

impl<'a> Decode<'a> for DataSegment<'a> {
    fn decode(cur: &mut ByteCursor<'a>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("data segment", cur.position());

        let flags_at = cur.position();
        let mode = match read_u32(cur, &cx)? {
            0 => SegmentMode::Active {
                index: 0,
                offset: ConstantExpression::decode(cur, &mut cx)?,
            },
            1 => {
                cx.require(Feature::BulkMemory, "passive data segment", flags_at)?;
                SegmentMode::Passive
            }
            2 => {
                cx.require(Feature::BulkMemory, "data segment memory index", flags_at)?;
                let index = read_u32(cur, &cx)?;
                let offset = ConstantExpression::decode(cur, &mut cx)?;
                SegmentMode::Active { index, offset }
            }
            flags => {
                return cx.fail(DecodeError::malformed(
                    flags_at,
                    Malformed::InvalidMarker {
                        what: "data segment flags",
                        expected: "0x00, 0x01 or 0x02".to_owned(),
                        byte: flags.min(0xFF) as u8,
                    },
                ));
            }
        };
        let init = read_length_prefixed(cur, &cx)?;
        Ok(DataSegment { mode, init })
    }
}

impl Decode<'_> for Locals {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let count = read_u32(cur, cx)?;
        let value_type = ValueType::decode(cur, cx)?;
        Ok(Locals { count, value_type })
    }
}

impl<'a> Decode<'a> for Code<'a> {
    fn decode(cur: &mut ByteCursor<'a>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("code", cur.position());

        let size = read_u32(cur, &cx)?;
        let entry = read_span(cur, size as usize, &cx)?;
        let mut body = ByteCursor::new(entry);

        let locals_at = body.position();
        let groups = read_count(&mut body, &cx)?;
        let mut locals = Vec::with_capacity(groups as usize);
        let mut total: u64 = 0;
        for _ in 0..groups {
            let group = Locals::decode(&mut body, &mut cx)?;
            total += u64::from(group.count);
            locals.push(group);
        }
        if total > u64::from(u32::MAX) {
            return cx.fail(DecodeError::OutOfRange {
                offset: locals_at,
                what: "local count",
                value: total,
                limit: u32::MAX.into(),
            });
        }

        Ok(Code {
            locals,
            body: Expression {
                data: body.take_rest(),
            },
        })
    }
}
