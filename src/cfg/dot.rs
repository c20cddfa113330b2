//! Graphviz output.
use super::builder::is_framing;
use super::{BasicBlock, BlockId, ControlFlowGraph, Successor};
use crate::core::Opcode;
use crate::decode::LazyExpression;
use crate::diagnostics::Context;
use std::borrow::Cow;
use std::io::{self, Write};

/// Successors beyond this many share one `trunc` port.
pub const MAX_PORTS: usize = 64;

/// Writes `cfg` as a `strict digraph`, one record node per live block.
///
/// Block code is decoded again with `cx` to list its instructions.
pub fn write_dot<W: Write>(
    cfg: &ControlFlowGraph<'_>,
    cx: &Context<'_>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "strict digraph {{")?;

    for (id, block) in cfg.live_blocks() {
        write_node(id, block, cx, out)?;
    }

    match cfg.entry() {
        BlockId::EXIT => writeln!(out, "  start -> end")?,
        entry => writeln!(out, "  start -> {entry}")?,
    }
    for (id, block) in cfg.live_blocks() {
        write_edges(id, block, out)?;
    }

    writeln!(out, "}}")?;
    out.flush()
}

fn write_node<W: Write>(
    id: BlockId,
    block: &BasicBlock<'_>,
    cx: &Context<'_>,
    out: &mut W,
) -> io::Result<()> {
    write!(out, "  {id} [shape=record;label=\"{{")?;
    for instr in LazyExpression::new(block.code, cx) {
        if is_framing(instr.opcode) {
            continue;
        }
        if instr.opcode == Opcode::BR_TABLE {
            write!(out, "{}...\\l", escape(&instr.opcode.to_string()))?;
        } else {
            write!(out, "{}\\l", escape(&instr.to_string()))?;
        }
    }

    if block.successors.len() > 1 {
        write!(out, "|{{")?;
        let mut sep = "";
        for (i, succ) in block.successors.iter().enumerate() {
            if i == MAX_PORTS {
                write!(out, "{sep}<trunc> ...")?;
                break;
            }
            let port = port(i, succ);
            write!(out, "{sep}<{port}>{}", escape(&port))?;
            sep = "|";
        }
        write!(out, "}}")?;
    }
    writeln!(out, "}}\"]")
}

fn write_edges<W: Write>(id: BlockId, block: &BasicBlock<'_>, out: &mut W) -> io::Result<()> {
    let ported = block.successors.len() > 1;
    for (i, succ) in block.successors.iter().enumerate() {
        write!(out, "  {id}")?;
        if ported {
            if i < MAX_PORTS {
                write!(out, ":\"{}\"", port(i, succ))?;
            } else {
                write!(out, ":trunc")?;
            }
        }
        match succ.target {
            BlockId::EXIT => write!(out, " -> end")?,
            target => write!(out, " -> {target}")?,
        }
        if i >= MAX_PORTS
            && let Some(label) = &succ.label
        {
            write!(out, " [headlabel=\"{label}\"]")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Port name of the `i`th successor: its label, or its position if it has
/// none.
fn port(i: usize, succ: &Successor) -> Cow<'static, str> {
    match &succ.label {
        Some(label) => label.clone(),
        None => format!("p{i}").into(),
    }
}

/// Backslash-escapes the characters that structure a record label.
fn escape(s: &str) -> Cow<'_, str> {
    const SPECIAL: &[char] = &['{', '}', '|', '<', '>', '"'];
    if !s.contains(SPECIAL) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
