//! Structured diagnostics returned alongside data.

mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};

/// An append-only list of diagnostics that mirrors every entry to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => tracing::info!(
                kind = diagnostic.kind.label(),
                source = %diagnostic.source,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                kind = diagnostic.kind.label(),
                source = %diagnostic.source,
                "{}",
                diagnostic.message
            ),
            Severity::Error => tracing::error!(
                kind = diagnostic.kind.label(),
                source = %diagnostic.source,
                "{}",
                diagnostic.message
            ),
        }
        self.entries.push(diagnostic);
    }

    /// Append diagnostics that were already mirrored elsewhere.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.entries.extend(diagnostics);
    }

    /// Whether any diagnostic of this kind was recorded.
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Consume the log.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
