use super::{BasicBlock, BlockId, CfgError, ControlFlowGraph, LabelKind, Successor};
use crate::core::{Expression, Immediate, Instruction, Opcode};
use crate::decode::LazyExpression;
use crate::diagnostics::Context;
use crate::span::Span;
use std::borrow::Cow;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct Label {
    kind: LabelKind,
    /// The block that was open when the label was pushed.
    enclosing: BlockId,
    /// Where a branch to this label goes.
    branch: BlockId,
    /// Where control goes after the matching `end`.
    next: BlockId,
}

/// Instructions that only frame control flow. A block holding nothing else
/// counts as empty.
pub(crate) fn is_framing(opcode: Opcode) -> bool {
    opcode == Opcode::BLOCK
        || opcode == Opcode::ELSE
        || opcode == Opcode::CATCH
        || opcode == Opcode::END
        || opcode == Opcode::BR
}

struct Builder<'a, 'c, 'd> {
    body: Span<'a>,
    cx: &'c Context<'d>,
    blocks: Vec<BasicBlock<'a>>,
    labels: Vec<Label>,
    errors: Vec<CfgError>,
    current: BlockId,
    /// Start offset of the open block.
    start: usize,
    /// Whether the open block holds anything besides control framing.
    has_content: bool,
}

/// Builds the control-flow graph of one function body.
///
/// The body's instructions are decoded on the fly with `cx`. If decoding
/// stops early the graph covers what was read; branch problems are recorded
/// in [`ControlFlowGraph::errors`] and reported to the sink as logic errors.
pub fn build_cfg<'a>(body: Expression<'a>, cx: &Context<'_>) -> ControlFlowGraph<'a> {
    let mut builder = Builder {
        body: body.data,
        cx,
        blocks: Vec::new(),
        labels: Vec::new(),
        errors: Vec::new(),
        current: BlockId::EXIT,
        start: body.data.begin(),
        has_content: false,
    };
    builder.push_label(LabelKind::Function, BlockId::EXIT, BlockId::EXIT);
    let entry = builder.new_block();
    builder.start_block(entry, body.data.begin());

    let mut instrs = LazyExpression::from_expression(body, cx);
    let mut end = body.data.begin();
    loop {
        let before = instrs.position();
        let Some(instr) = instrs.next() else {
            break;
        };
        end = instrs.position();
        builder.step(&instr, before, end);
    }
    builder.finish(end);

    debug!(
        blocks = builder.blocks.len(),
        errors = builder.errors.len(),
        "built control-flow graph"
    );
    ControlFlowGraph {
        blocks: builder.blocks,
        entry,
        errors: builder.errors,
    }
}

impl<'a> Builder<'a, '_, '_> {
    /// Applies one instruction spanning `before..after`.
    fn step(&mut self, instr: &Instruction, before: usize, after: usize) {
        let opcode = instr.opcode;
        if opcode != Opcode::LOOP && !is_framing(opcode) {
            self.has_content = true;
        }

        match opcode {
            Opcode::BLOCK => {
                let next = self.new_block();
                self.push_label(LabelKind::Block, next, next);
            }
            Opcode::LOOP => {
                let header = self.new_block();
                let next = self.new_block();
                self.add_successor(Successor::unlabeled(header));
                self.push_label(LabelKind::Loop, header, next);
                // the header starts with the `loop` itself
                self.start_block(header, before);
                self.has_content = true;
            }
            Opcode::IF => self.open_arm(LabelKind::If, "T", after),
            Opcode::TRY => self.open_arm(LabelKind::Try, "try", after),
            Opcode::ELSE => {
                self.alternate(opcode, LabelKind::If, LabelKind::Else, "F", before, after);
            }
            Opcode::CATCH => {
                self.alternate(opcode, LabelKind::Try, LabelKind::Catch, "catch", before, after);
            }
            Opcode::END => {
                let Some(top) = self.pop_label(opcode, before) else {
                    return;
                };
                self.add_successor(Successor::unlabeled(top.next));
                if top.kind == LabelKind::If {
                    self.add_edge(top.enclosing, Successor::labeled("F", top.next));
                }
                self.start_block(top.next, after);
            }
            Opcode::BR => {
                if let Immediate::Index(depth) = instr.immediate {
                    self.branch(depth, None, before);
                }
                self.mark_unreachable(after);
            }
            Opcode::BR_IF => {
                if let Immediate::Index(depth) = instr.immediate {
                    self.branch(depth, Some("T".into()), before);
                }
                self.fall_through(after);
            }
            Opcode::BR_ON_EXN => {
                if let Immediate::BrOnExn { target, .. } = instr.immediate {
                    self.branch(target, Some("T".into()), before);
                }
                self.fall_through(after);
            }
            Opcode::BR_TABLE => {
                if let Immediate::BrTable(table) = &instr.immediate {
                    for (i, &depth) in table.targets.iter().enumerate() {
                        self.branch(depth, Some(i.to_string().into()), before);
                    }
                    self.branch(table.default_target, Some("default".into()), before);
                }
                self.mark_unreachable(after);
            }
            Opcode::UNREACHABLE
            | Opcode::RETURN
            | Opcode::RETURN_CALL
            | Opcode::RETURN_CALL_INDIRECT
            | Opcode::THROW
            | Opcode::RETHROW => self.mark_unreachable(after),
            _ => {}
        }
    }

    /// `if` and `try`: the body is entered through a `label` edge.
    fn open_arm(&mut self, kind: LabelKind, label: &'static str, after: usize) {
        let body = self.new_block();
        let next = self.new_block();
        self.add_successor(Successor::labeled(label, body));
        self.push_label(kind, next, next);
        self.start_block(body, after);
    }

    /// `else` and `catch`: close the first arm and open the second from the
    /// block the construct started in.
    fn alternate(
        &mut self,
        opcode: Opcode,
        expected: LabelKind,
        kind: LabelKind,
        label: &'static str,
        before: usize,
        after: usize,
    ) {
        let Some(top) = self.labels.last().copied() else {
            self.error(CfgError::LabelUnderflow {
                offset: before,
                opcode,
            });
            return;
        };
        if top.kind != expected {
            self.error(CfgError::MismatchedLabel {
                offset: before,
                opcode,
                open: top.kind,
            });
            return;
        }
        self.labels.pop();

        self.add_successor(Successor::unlabeled(top.next));
        let arm = self.new_block();
        self.add_edge(top.enclosing, Successor::labeled(label, arm));
        self.labels.push(Label {
            kind,
            enclosing: top.enclosing,
            branch: top.next,
            next: top.next,
        });
        self.start_block(arm, after);
    }

    fn fall_through(&mut self, after: usize) {
        let next = self.new_block();
        self.add_successor(Successor::labeled("F", next));
        self.start_block(next, after);
    }

    /// Adds an edge from the open block to the label `depth` levels up.
    fn branch(&mut self, depth: u32, label: Option<Cow<'static, str>>, offset: usize) {
        let open = self.labels.len();
        match (depth as usize)
            .checked_add(1)
            .and_then(|d| open.checked_sub(d))
        {
            Some(i) => {
                let target = self.labels[i].branch;
                self.add_successor(Successor::new(label, target));
            }
            None => self.error(CfgError::InvalidBranchDepth {
                offset,
                depth,
                labels: open,
            }),
        }
    }

    /// Code after an unconditional transfer lands in a fresh block that
    /// nothing branches to.
    fn mark_unreachable(&mut self, after: usize) {
        let next = self.new_block();
        self.start_block(next, after);
    }

    fn push_label(&mut self, kind: LabelKind, branch: BlockId, next: BlockId) {
        self.labels.push(Label {
            kind,
            enclosing: self.current,
            branch,
            next,
        });
    }

    fn pop_label(&mut self, opcode: Opcode, offset: usize) -> Option<Label> {
        let label = self.labels.pop();
        if label.is_none() {
            self.error(CfgError::LabelUnderflow { offset, opcode });
        }
        label
    }

    fn new_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks
            .push(BasicBlock::new(Span::empty_at(self.body.begin()), Vec::new()));
        id
    }

    fn add_successor(&mut self, successor: Successor) {
        self.add_edge(self.current, successor);
    }

    fn add_edge(&mut self, from: BlockId, successor: Successor) {
        // nothing leaves the exit, e.g. stray code after the final `end`
        if !from.is_exit()
            && let Some(block) = self.blocks.get_mut(from.index())
        {
            block.successors.push(successor);
        }
    }

    /// Closes the open block at `at` and opens `id` there.
    fn start_block(&mut self, id: BlockId, at: usize) {
        self.end_block(at);
        self.current = id;
        self.start = at;
        self.has_content = false;
    }

    fn end_block(&mut self, at: usize) {
        if self.current.is_exit() {
            return;
        }
        let code = if self.has_content {
            self.body
                .slice(self.start, at)
                .unwrap_or(Span::empty_at(self.start))
        } else {
            Span::empty_at(self.start)
        };
        if let Some(block) = self.blocks.get_mut(self.current.index()) {
            block.code = code;
        }
    }

    fn finish(&mut self, at: usize) {
        self.end_block(at);
        self.current = BlockId::EXIT;
    }

    fn error(&mut self, err: CfgError) {
        self.cx.report(err.kind(), err.offset(), err.to_string());
        self.errors.push(err);
    }
}
