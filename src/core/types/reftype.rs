use std::fmt;

/// Reference types classify first-class references to objects in the runtime
/// store.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ReferenceType {
    Funcref,
    Externref,
    Exnref,
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceType::Funcref => "funcref",
            ReferenceType::Externref => "externref",
            ReferenceType::Exnref => "exnref",
        })
    }
}
