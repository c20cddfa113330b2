use super::reftype::ReferenceType;
use std::fmt;

/// Value types classify the individual values that instructions compute with
/// and the values of locals, globals and function parameters.
///
/// <https://webassembly.github.io/spec/core/binary/types.html#value-types>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
    V128,
    Ref(ReferenceType),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::I32 => f.write_str("i32"),
            ValueType::I64 => f.write_str("i64"),
            ValueType::F32 => f.write_str("f32"),
            ValueType::F64 => f.write_str("f64"),
            ValueType::V128 => f.write_str("v128"),
            ValueType::Ref(r) => r.fmt(f),
        }
    }
}
