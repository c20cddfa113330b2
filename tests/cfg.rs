use googletest::prelude::*;
use pretty_assertions::assert_eq;
use wabin::lookup::FunctionIndex;
use wabin::{
    BasicBlock, BlockId, Context, ControlFlowGraph, DiagnosticLog, Features, NopDiagnostics,
    Span, Successor, build_cfg, write_dot,
};

fn wasm(text: &str) -> Vec<u8> {
    wat::parse_str(text).expect("valid module text")
}

/// The graph of function `$f`, before elision.
fn graph(bytes: &[u8]) -> ControlFlowGraph<'_> {
    let log = DiagnosticLog::new();
    let cx = Context::new(Features::all(), &log);
    let functions = FunctionIndex::build(bytes, &cx);
    let index = functions.lookup("f").expect("a function named f");
    let code = functions
        .code_for_function(index, &cx)
        .expect("f has a body");
    let cfg = build_cfg(code.body, &cx);
    assert!(log.is_empty(), "{:?}", log.entries());
    cfg
}

fn edges<'g>(cfg: &'g ControlFlowGraph<'_>, id: u32) -> Vec<(Option<&'g str>, BlockId)> {
    cfg.block(BlockId(id))
        .map(|b| {
            b.successors
                .iter()
                .map(|s| (s.label.as_deref(), s.target))
                .collect()
        })
        .unwrap_or_default()
}

fn live(cfg: &ControlFlowGraph<'_>) -> Vec<BlockId> {
    cfg.live_blocks().map(|(id, _)| id).collect()
}

#[test]
fn straight_line_function_is_one_block() {
    let bytes = wasm(r#"(module (func $f (result i32) i32.const 1 i32.const 2 i32.add))"#);
    let mut cfg = graph(&bytes);
    cfg.elide_empty_blocks();

    assert_eq!(live(&cfg), vec![BlockId(0)]);
    assert_eq!(edges(&cfg, 0), vec![(None, BlockId::EXIT)]);
    assert_eq!(cfg.entry(), BlockId(0));
}

#[test]
fn plain_block_collapses() {
    let bytes = wasm(r#"(module (func $f block nop end))"#);
    let mut cfg = graph(&bytes);
    assert_eq!(cfg.len(), 2);

    cfg.elide_empty_blocks();
    assert_eq!(live(&cfg), vec![BlockId(0)]);
    assert_eq!(edges(&cfg, 0), vec![(None, BlockId::EXIT)]);
}

#[test]
fn if_else_branches_merge() {
    let bytes = wasm(
        r#"(module
            (func $f (param i32) (result i32)
              local.get 0
              if (result i32)
                i32.const 1
              else
                i32.const 2
              end
              i32.const 3
              i32.add))"#,
    );
    let mut cfg = graph(&bytes);
    cfg.elide_empty_blocks();

    // 0: entry, 1: then, 2: merge, 3: else
    assert_eq!(
        edges(&cfg, 0),
        vec![(Some("T"), BlockId(1)), (Some("F"), BlockId(3))]
    );
    assert_eq!(edges(&cfg, 1), vec![(None, BlockId(2))]);
    assert_eq!(edges(&cfg, 3), vec![(None, BlockId(2))]);
    assert_eq!(edges(&cfg, 2), vec![(None, BlockId::EXIT)]);
}

#[test]
fn if_without_else_falls_through_on_false() {
    let bytes = wasm(
        r#"(module
            (func $f (param i32)
              local.get 0
              if
                nop
              end
              nop))"#,
    );
    let cfg = graph(&bytes);

    // 0: entry, 1: then, 2: after
    assert_eq!(
        edges(&cfg, 0),
        vec![(Some("T"), BlockId(1)), (Some("F"), BlockId(2))]
    );
    assert_eq!(edges(&cfg, 1), vec![(None, BlockId(2))]);
}

#[test]
fn br_table_has_one_edge_per_target_plus_default() {
    let bytes = wasm(
        r#"(module
            (func $f (param i32)
              block
                block
                  block
                    local.get 0
                    br_table 0 1 2
                  end
                end
              end))"#,
    );
    let cfg = graph(&bytes);

    assert_eq!(
        edges(&cfg, 0),
        vec![
            (Some("0"), BlockId(3)),
            (Some("1"), BlockId(2)),
            (Some("default"), BlockId(1)),
        ]
    );
    // the code after br_table starts a block nothing branches to
    let after = BlockId(4);
    assert!(cfg.block(after).is_some());
    assert!(
        cfg.blocks()
            .all(|(_, b)| b.successors.iter().all(|s| s.target != after))
    );
}

#[test]
fn branch_depths_resolve_against_the_label_stack() {
    let bytes = wasm(
        r#"(module
            (func $f (param i32)
              loop
                local.get 0
                if
                  br 1
                end
              end))"#,
    );
    let cfg = graph(&bytes);

    // 0: entry (empty), 1: loop header, 2: loop exit, 3: then, 4: after the if
    assert_eq!(edges(&cfg, 0), vec![(None, BlockId(1))]);
    assert_eq!(edges(&cfg, 3), vec![(None, BlockId(1))]);
    assert_eq!(
        edges(&cfg, 1),
        vec![(Some("T"), BlockId(3)), (Some("F"), BlockId(4))]
    );

    let bytes = wasm(
        r#"(module
            (func $f (param i32)
              block
                loop
                  local.get 0
                  if
                    br 2
                  end
                  br 0
                end
              end))"#,
    );
    let cfg = graph(&bytes);

    // 1: block exit, 2: loop header, 4: then, 5: after the if
    assert_eq!(edges(&cfg, 4), vec![(None, BlockId(1))]);
    assert_eq!(edges(&cfg, 5), vec![(None, BlockId(2))]);
}

#[test]
fn empty_chains_are_skipped() {
    let code = [0x01];
    let full = |successors: Vec<Successor>| BasicBlock::new(Span::new(&code), successors);
    let empty =
        |to: u32| BasicBlock::new(Span::empty_at(0), vec![Successor::unlabeled(BlockId(to))]);

    let mut cfg = ControlFlowGraph::from_blocks(
        BlockId(0),
        vec![
            full(vec![
                Successor::labeled("T", BlockId(1)),
                Successor::labeled("F", BlockId(4)),
            ]),
            empty(2),
            empty(3),
            empty(4),
            full(vec![]),
        ],
    );
    cfg.elide_empty_blocks();

    assert_eq!(
        edges(&cfg, 0),
        vec![(Some("T"), BlockId(4)), (Some("F"), BlockId(4))]
    );
    assert_eq!(live(&cfg), vec![BlockId(0), BlockId(4)]);
}

#[gtest]
fn dot_output_for_a_conditional() {
    let bytes = wasm(
        r#"(module
            (func $f (param i32) (result i32)
              local.get 0
              if (result i32)
                i32.const 1
              else
                i32.const 2
              end))"#,
    );
    let mut cfg = graph(&bytes);
    cfg.elide_empty_blocks();

    let cx = Context::new(Features::all(), &NopDiagnostics);
    let mut out = Vec::new();
    write_dot(&cfg, &cx, &mut out).expect("writing to a Vec");
    let dot = String::from_utf8(out).expect("utf-8 output");

    expect_that!(dot.as_str(), starts_with("strict digraph {\n"));
    expect_that!(dot.as_str(), ends_with("}\n"));
    expect_that!(
        dot.as_str(),
        contains_substring("  0 [shape=record;label=\"{local.get 0\\lif (result i32)\\l|{<T>T|<F>F}}\"]\n")
    );
    expect_that!(dot.as_str(), contains_substring("  1 [shape=record;label=\"{i32.const 1\\l}\"]\n"));
    expect_that!(dot.as_str(), contains_substring("  start -> 0\n"));
    expect_that!(dot.as_str(), contains_substring("  0:\"T\" -> 1\n"));
    expect_that!(dot.as_str(), contains_substring("  0:\"F\" -> 3\n"));
    expect_that!(dot.as_str(), contains_substring("  1 -> end\n"));
    expect_that!(dot.as_str(), contains_substring("  3 -> end\n"));
    expect_that!(dot.as_str(), not(contains_substring("  2 [")));
}

#[test]
fn empty_infinite_loop_keeps_its_header() {
    let bytes = wasm(r#"(module (func $f loop br 0 end))"#);
    let mut cfg = graph(&bytes);
    cfg.elide_empty_blocks();

    // 1: loop header, holding `loop` and `br 0`
    assert_eq!(cfg.entry(), BlockId(1));
    assert_eq!(live(&cfg), vec![BlockId(1)]);
    assert_eq!(edges(&cfg, 1), vec![(None, BlockId(1))]);

    let cx = Context::new(Features::all(), &NopDiagnostics);
    let mut out = Vec::new();
    write_dot(&cfg, &cx, &mut out).expect("writing to a Vec");
    let dot = String::from_utf8(out).expect("utf-8 output");
    assert_eq!(
        dot,
        "strict digraph {\n\
         \x20 1 [shape=record;label=\"{loop\\l}\"]\n\
         \x20 start -> 1\n\
         \x20 1 -> 1\n\
         }\n"
    );
}
