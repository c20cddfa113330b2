use crate::core::types::{BlockType, ValueType};
use crate::decode::integer::read_s33;
use crate::decode::{Decode, DecodeError, DecodeResult, FromMarkerByte, Malformed};
use crate::diagnostics::Context;
use crate::features::Feature;
use crate::span::ByteCursor;

const VOID: u8 = 0x40;

impl Decode<'_> for BlockType {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let start = *cur;
        let byte = crate::decode::helpers::peek_u8(cur, cx)?;

        if byte == VOID {
            cur.take_u8();
            return Ok(BlockType::Void);
        }
        if ValueType::from_marker(byte).is_some() {
            return ValueType::decode(cur, cx).map(BlockType::Value);
        }

        // anything else is the start of a non-negative s33 type index
        let index = read_s33(cur, cx)?;
        if index < 0 {
            *cur = start;
            return cx.fail(DecodeError::malformed(
                start.position(),
                Malformed::NegativeBlockTypeIndex(index),
            ));
        }
        if let Err(err) = cx.require(Feature::MultiValue, "type index block type", start.position())
        {
            *cur = start;
            return Err(err);
        }
        Ok(BlockType::Index(index as u32))
    }
}
