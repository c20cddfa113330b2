//! Diagnostic sinks and the per-session decode context.
//!
//! Decoders never log failures themselves. They push named [`Frame`]s onto the
//! [`Context`] while a compound value is in progress, and when a read fails the
//! context reports a [`Diagnostic`] carrying the whole active frame stack to the
//! session's [`Diagnostics`] sink.
use crate::decode::{DecodeError, DecodeResult, ErrorKind};
use crate::features::{Feature, Features};
use std::cell::RefCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// One entry of the context stack: what was being decoded, and where it began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub label: &'static str,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub offset: usize,
    /// Outermost frame first.
    pub context: Vec<Frame>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.context {
            write!(f, "{} ({:#x}) > ", frame.label, frame.offset)?;
        }
        f.write_str(&self.message)
    }
}

/// Receives failures as they are recorded.
pub trait Diagnostics {
    fn report(&self, diagnostic: Diagnostic);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopDiagnostics;

impl Diagnostics for NopDiagnostics {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps every reported diagnostic in memory, in report order.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// A snapshot of what has been reported so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries.into_inner()
    }
}

impl Diagnostics for DiagnosticLog {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}

/// Forwards every diagnostic to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = ?diagnostic.kind,
            offset = diagnostic.offset,
            "{diagnostic}"
        );
    }
}

/// State threaded through every decode call of one session: the enabled
/// features, the diagnostic sink and the current context stack.
///
/// Cloning a context snapshots its frame stack; lazy sequences hold such a
/// snapshot so that failures found on a later pull still carry the frames
/// that were active when the sequence was created.
#[derive(Clone)]
pub struct Context<'d> {
    features: Features,
    sink: &'d dyn Diagnostics,
    frames: Vec<Frame>,
}

impl<'d> Context<'d> {
    pub fn new(features: Features, sink: &'d dyn Diagnostics) -> Self {
        Self {
            features,
            sink,
            frames: Vec::new(),
        }
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.features.is_enabled(feature)
    }

    pub fn sink(&self) -> &'d dyn Diagnostics {
        self.sink
    }

    /// The active frames, outermost first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Pushes a frame that stays active until the returned guard is dropped.
    pub fn scope(&mut self, label: &'static str, offset: usize) -> Scope<'_, 'd> {
        self.frames.push(Frame { label, offset });
        Scope { cx: self }
    }

    /// A copy of this context with one more frame on top, for state that
    /// outlives the current call (lazy sequences).
    pub fn with_frame(&self, label: &'static str, offset: usize) -> Context<'d> {
        let mut cx = self.clone();
        cx.frames.push(Frame { label, offset });
        cx
    }

    /// Sends a diagnostic carrying the current frame stack to the sink.
    pub fn report(&self, kind: ErrorKind, offset: usize, message: String) {
        self.sink.report(Diagnostic {
            kind,
            offset,
            context: self.frames.clone(),
            message,
        });
    }

    /// Records `err` and hands it back as a failed result.
    pub(crate) fn fail<T>(&self, err: DecodeError) -> DecodeResult<T> {
        self.report(err.kind(), err.offset(), err.to_string());
        Err(err)
    }

    /// Fails with `FeatureDisabled` unless `feature` is on.
    pub(crate) fn require(
        &self,
        feature: Feature,
        what: &'static str,
        offset: usize,
    ) -> DecodeResult<()> {
        if self.is_enabled(feature) {
            return Ok(());
        }
        self.fail(DecodeError::FeatureDisabled {
            offset,
            what,
            feature,
        })
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("features", &self.features)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

/// Guard returned by [`Context::scope`]; pops its frame when dropped, on every
/// exit path of the decoder that opened it.
pub struct Scope<'c, 'd> {
    cx: &'c mut Context<'d>,
}

impl<'d> Deref for Scope<'_, 'd> {
    type Target = Context<'d>;

    fn deref(&self) -> &Self::Target {
        self.cx
    }
}

impl DerefMut for Scope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cx
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        self.cx.frames.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Malformed;

    fn nested_failure(cx: &mut Context<'_>) -> DecodeResult<()> {
        let mut cx = cx.scope("global type", 4);
        let cx = cx.scope("value type", 5);
        cx.fail(DecodeError::malformed(
            5,
            Malformed::UnexpectedEof {
                needed: 1,
                remaining: 0,
            },
        ))
    }

    #[test]
    fn failure_carries_the_active_stack_and_scopes_unwind() {
        let log = DiagnosticLog::new();
        let mut cx = Context::new(Features::mvp(), &log);

        assert!(nested_failure(&mut cx).is_err());
        assert!(cx.frames().is_empty());

        let entries = log.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ErrorKind::Malformed);
        assert_eq!(
            entries[0].context,
            vec![
                Frame {
                    label: "global type",
                    offset: 4
                },
                Frame {
                    label: "value type",
                    offset: 5
                },
            ]
        );
        assert!(entries[0].to_string().starts_with("global type (0x4) > value type (0x5) > "));
    }

    #[test]
    fn require_checks_the_session_features() {
        let log = DiagnosticLog::new();
        let cx = Context::new(Features::mvp().with(Feature::Simd), &log);

        assert!(cx.require(Feature::Simd, "v128", 0).is_ok());
        let err = cx.require(Feature::TailCall, "return_call", 9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FeatureDisabled);
        assert_eq!(log.len(), 1);
    }
}
