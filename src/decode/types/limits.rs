use crate::core::types::Limits;
use crate::decode::integer::{read_u32, read_u8};
use crate::decode::{Decode, DecodeError, DecodeResult, Malformed};
use crate::diagnostics::Context;
use crate::features::Feature;
use crate::span::ByteCursor;

impl Decode<'_> for Limits {
    fn decode(cur: &mut ByteCursor<'_>, cx: &mut Context<'_>) -> DecodeResult<Self> {
        let cx = cx.scope("limits", cur.position());

        let flags_at = *cur;
        let (has_max, shared) = match read_u8(cur, &cx)? {
            0x00 => (false, false),
            0x01 => (true, false),
            0x02 => (false, true),
            0x03 => (true, true),
            byte => {
                *cur = flags_at;
                return cx.fail(DecodeError::malformed(
                    flags_at.position(),
                    Malformed::InvalidMarker {
                        what: "limits flags",
                        expected: "0x00, 0x01, 0x02 or 0x03".to_owned(),
                        byte,
                    },
                ));
            }
        };
        if shared && let Err(err) = cx.require(Feature::Threads, "shared limits", flags_at.position()) {
            *cur = flags_at;
            return Err(err);
        }

        let min = read_u32(cur, &cx)?;
        let max = if has_max {
            Some(read_u32(cur, &cx)?)
        } else {
            None
        };

        Ok(Limits { min, max, shared })
    }
}
