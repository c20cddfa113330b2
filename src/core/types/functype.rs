use super::valtype::ValueType;

/// Function types classify the signature of functions, mapping a vector of parameters to a
/// vector of results.
///
/// <https://webassembly.github.io/spec/core/binary/types.html#function-types>
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct FunctionType {
    pub params: Vec<ValueType>,
    pub results: Vec<ValueType>,
}
