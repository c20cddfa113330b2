use super::valtype::ValueType;
use crate::core::Index;
use std::fmt;

/// The result signature of a structured control instruction.
///
/// <https://webassembly.github.io/spec/core/binary/instructions.html#control-instructions>
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BlockType {
    Void,
    Value(ValueType),
    /// A type index; requires the multi-value feature.
    Index(Index),
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Void => Ok(()),
            BlockType::Value(t) => write!(f, "(result {t})"),
            BlockType::Index(i) => write!(f, "(type {i})"),
        }
    }
}
