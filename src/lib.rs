//! A zero-copy decoder for WebAssembly modules in the binary format, with a
//! control-flow graph builder for function bodies.
//!
//! Decoding is lazy: [`read_module`] frames sections one per pull, the readers
//! in [`decode::sections`] decode section entries one per pull, and
//! [`decode::LazyExpression`] decodes a body one instruction per pull. Every
//! decoded value borrows from the input buffer.
//!
//! Failures are reported to the [`Diagnostics`] sink carried by the decode
//! [`Context`], together with the stack of what was being decoded at the time.
//! The same context carries the enabled [`Features`].
//!
//! ```
//! use wabin::{Context, DiagnosticLog, Features, build_cfg, lookup::FunctionIndex};
//!
//! let wasm = [
//!     0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // preamble
//!     0x01, 0x04, 0x01, 0x60, 0x00, 0x00, // type section: [] -> []
//!     0x03, 0x02, 0x01, 0x00, // function section: one function of type 0
//!     0x0A, 0x04, 0x01, 0x02, 0x00, 0x0B, // code section: no locals, `end`
//! ];
//! let log = DiagnosticLog::new();
//! let cx = Context::new(Features::all(), &log);
//!
//! let functions = FunctionIndex::build(&wasm, &cx);
//! let code = functions.code_for_function(0, &cx).unwrap();
//! let mut cfg = build_cfg(code.body, &cx);
//! cfg.elide_empty_blocks();
//!
//! assert_eq!(cfg.live_blocks().count(), 0);
//! assert!(log.is_empty());
//! ```
//!
//! <https://webassembly.github.io/spec/core/binary/index.html>
#![forbid(unsafe_code)]

pub mod cfg;
pub mod core;
pub mod decode;
pub mod diagnostics;
pub mod features;
pub mod lookup;
pub mod span;

pub use cfg::{BasicBlock, BlockId, CfgError, ControlFlowGraph, Successor, build_cfg, write_dot};
pub use decode::{DecodeError, DecodeResult, ErrorKind, read_module};
pub use diagnostics::{
    Context, Diagnostic, DiagnosticLog, Diagnostics, Frame, NopDiagnostics, TracingDiagnostics,
};
pub use features::{Feature, Features};
pub use span::{ByteCursor, Span};
