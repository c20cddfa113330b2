use super::valtype::ValueType;

/// Global types classify global variables, which hold a value and can either be mutable or
/// immutable.
///
/// <https://webassembly.github.io/spec/core/binary/types.html#global-types>
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct GlobalType {
    pub value_type: ValueType,
    pub mutability: Mutability,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mutability {
    Const,
    Var,
}
