use crate::core::Index;

/// The only attribute defined by the exceptions proposal.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EventAttribute {
    Exception,
}

/// Events describe the signature of an exception through a type index.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct EventType {
    pub attribute: EventAttribute,
    pub type_index: Index,
}
