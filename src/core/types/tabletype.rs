use super::limits::Limits;
use super::reftype::ReferenceType;

/// Table types classify tables over elements of reference type within a size range.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct TableType {
    pub limits: Limits,
    pub elem_type: ReferenceType,
}
