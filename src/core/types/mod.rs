//! Type definitions for core WebAssembly types.
//!
//! <https://webassembly.github.io/spec/core/syntax/types.html>
pub mod blocktype;
pub use blocktype::BlockType;

pub mod eventtype;
pub use eventtype::{EventAttribute, EventType};

pub mod externtype;
pub use externtype::ExternalKind;

pub mod functype;
pub use functype::FunctionType;

pub mod globaltype;
pub use globaltype::{GlobalType, Mutability};

pub mod limits;
pub use limits::Limits;

pub mod memtype;
pub use memtype::MemoryType;

pub mod reftype;
pub use reftype::ReferenceType;

pub mod tabletype;
pub use tabletype::TableType;

pub mod valtype;
pub use valtype::ValueType;
