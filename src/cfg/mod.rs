//! Control-flow graphs of function bodies.
//!
//! [`build_cfg`] walks one body's instruction stream and splits it into
//! basic blocks joined by labelled edges. [`ControlFlowGraph::elide_empty_blocks`]
//! then removes the pass-through blocks that structured control leaves
//! behind, and [`write_dot`] renders what is left as a Graphviz digraph.
mod builder;
mod dot;
mod elide;

pub use builder::build_cfg;
pub use dot::{MAX_PORTS, write_dot};

use crate::core::Opcode;
use crate::decode::ErrorKind;
use crate::span::Span;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Identifies a basic block. Ids are handed out in order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u32);

impl BlockId {
    /// Edges to this id leave the function.
    pub const EXIT: BlockId = BlockId(u32::MAX);

    pub fn is_exit(self) -> bool {
        self == Self::EXIT
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exit() {
            f.write_str("exit")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor {
    /// `T`/`F` for conditionals, the table position or `default` for
    /// `br_table`; plain fallthrough and `br` edges have none.
    pub label: Option<Cow<'static, str>>,
    pub target: BlockId,
}

impl Successor {
    pub fn new(label: Option<Cow<'static, str>>, target: BlockId) -> Self {
        Self { label, target }
    }

    pub fn unlabeled(target: BlockId) -> Self {
        Self::new(None, target)
    }

    pub fn labeled(label: impl Into<Cow<'static, str>>, target: BlockId) -> Self {
        Self::new(Some(label.into()), target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock<'a> {
    /// The instruction bytes of the block. Empty when the block holds
    /// nothing but control framing (`block`, `else`, `end`, `br`, ...).
    pub code: Span<'a>,
    pub successors: Vec<Successor>,
    elided: bool,
}

impl<'a> BasicBlock<'a> {
    pub fn new(code: Span<'a>, successors: Vec<Successor>) -> Self {
        Self {
            code,
            successors,
            elided: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Whether [`ControlFlowGraph::elide_empty_blocks`] removed this block.
    pub fn is_elided(&self) -> bool {
        self.elided
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFlowGraph<'a> {
    blocks: Vec<BasicBlock<'a>>,
    entry: BlockId,
    errors: Vec<CfgError>,
}

impl<'a> ControlFlowGraph<'a> {
    /// A graph from blocks indexed by their [`BlockId`].
    pub fn from_blocks(entry: BlockId, blocks: Vec<BasicBlock<'a>>) -> Self {
        Self {
            blocks,
            entry,
            errors: Vec::new(),
        }
    }

    pub fn entry(&self) -> BlockId {
        self.entry
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock<'a>> {
        self.blocks.get(id.index())
    }

    /// Every block, elided or not, in id order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &BasicBlock<'a>)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (BlockId(i as u32), block))
    }

    /// The blocks that survived elision.
    pub fn live_blocks(&self) -> impl Iterator<Item = (BlockId, &BasicBlock<'a>)> {
        self.blocks().filter(|(_, block)| !block.elided)
    }

    /// Branch and label-stack problems met while building, in stream order.
    pub fn errors(&self) -> &[CfgError] {
        &self.errors
    }
}

/// What opened a label on the builder's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// The implicit label around the whole body.
    Function,
    Block,
    Loop,
    If,
    Else,
    Try,
    Catch,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LabelKind::Function => "function",
            LabelKind::Block => "block",
            LabelKind::Loop => "loop",
            LabelKind::If => "if",
            LabelKind::Else => "else",
            LabelKind::Try => "try",
            LabelKind::Catch => "catch",
        })
    }
}

/// Stack-imbalance and branch-depth problems. None of these stop a build;
/// the offending edge or instruction is skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CfgError {
    #[error("invalid branch depth {depth} at offset {offset:#x} ({labels} labels open)")]
    InvalidBranchDepth {
        offset: usize,
        depth: u32,
        labels: usize,
    },

    #[error("{opcode} at offset {offset:#x} with no open label")]
    LabelUnderflow { offset: usize, opcode: Opcode },

    #[error("{opcode} at offset {offset:#x} does not match the open {open}")]
    MismatchedLabel {
        offset: usize,
        opcode: Opcode,
        open: LabelKind,
    },
}

impl CfgError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::LogicError
    }

    pub fn offset(&self) -> usize {
        match *self {
            CfgError::InvalidBranchDepth { offset, .. }
            | CfgError::LabelUnderflow { offset, .. }
            | CfgError::MismatchedLabel { offset, .. } => offset,
        }
    }
}
