//! Sinks for non-fatal problems found while binding a document.
//!
//! A [`Session`](crate::Session) holds an `Rc<dyn Diagnostics>` and lends it
//! to the [`TreeWalker`](crate::walker::TreeWalker), the only component that
//! skips annotations, so callers decide where reports go.

use std::cell::RefCell;
use std::fmt;

use crate::control::ControlError;
use crate::control_spec::SpecError;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// The annotation does not describe a control.
    InvalidSpec(SpecError),
    /// The toolkit refused the options.
    BuildFailed(ControlError),
    /// A second binding took over an existing name.
    DuplicateName,
}

/// One report, tied to the fully-qualified name of the annotation site.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub site: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(site: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self { site: site.into(), kind }
    }

    /// Whether the annotation was dropped.
    pub fn is_skip(&self) -> bool {
        !matches!(self.kind, DiagnosticKind::DuplicateName)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::InvalidSpec(e) => write!(f, "{}: skipped annotation: {e}", self.site),
            DiagnosticKind::BuildFailed(e) => write!(f, "{}: skipped control: {e}", self.site),
            DiagnosticKind::DuplicateName => write!(f, "{}: binding replaced by a later annotation", self.site),
        }
    }
}

pub trait Diagnostics {
    fn report(&self, diagnostic: Diagnostic);
}

// ── LogDiagnostics ────────────────────────────────────────────────────────

/// Forwards reports to the `log` facade: skips as errors, the rest as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        if diagnostic.is_skip() {
            log::error!(target: "yamlknobs", "{diagnostic}");
        } else {
            log::warn!(target: "yamlknobs", "{diagnostic}");
        }
    }
}

// ── CollectingDiagnostics ─────────────────────────────────────────────────

/// Keeps every report for later inspection.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    items: RefCell<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.items.borrow().clone()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.items.borrow_mut())
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        log::debug!("collected: {diagnostic}");
        self.items.borrow_mut().push(diagnostic);
    }
}
