use super::limits::Limits;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct MemoryType {
    pub limits: Limits,
}
