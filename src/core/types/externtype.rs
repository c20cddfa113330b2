use std::fmt;

/// What an import or export refers to.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ExternalKind {
    Function,
    Table,
    Memory,
    Global,
    Event,
}

impl fmt::Display for ExternalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExternalKind::Function => "func",
            ExternalKind::Table => "table",
            ExternalKind::Memory => "memory",
            ExternalKind::Global => "global",
            ExternalKind::Event => "event",
        })
    }
}
