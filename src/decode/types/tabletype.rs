use crate::core::types::{Limits, MemoryType, ReferenceType, TableType};
use crate::decode::{Decode, DecodeResult};
use crate::diagnostics::Context;
use crate::span::ByteCursor;

impl Decode<'_> for TableType {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("table type", cur.position());
        let elem_type = ReferenceType::decode(cur, &mut cx)?;
        let limits = Limits::decode(cur, &mut cx)?;
        Ok(TableType { limits, elem_type })
    }
}

impl Decode<'_> for MemoryType {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let mut cx = cx.scope("memory type", cur.position());
        let limits = Limits::decode(cur, &mut cx)?;
        Ok(MemoryType { limits })
    }
}
