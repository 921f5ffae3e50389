//! Non-fatal diagnostics
//!
//! Diagnostics never stop generation. Each one is logged when it is recorded
//! and returned to the caller with the generated stub.

use std::fmt;

/// The kind of a non-fatal diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A parameter has no `:type` documentation and is typed `typing.Any`
    UnresolvedParameter,
    /// A `:type` line names a parameter absent from the signature
    UnknownDocumentedParameter,
    /// A member could not be classified and was skipped
    UnsupportedMember,
    /// A callable's binding could not be inspected and defaults to instance
    ClassificationFallback,
    /// A member name was already emitted in the same list
    DuplicateMember,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::UnresolvedParameter => "unresolved parameter",
            DiagnosticKind::UnknownDocumentedParameter => "unknown documented parameter",
            DiagnosticKind::UnsupportedMember => "unsupported member",
            DiagnosticKind::ClassificationFallback => "classification fallback",
            DiagnosticKind::DuplicateMember => "duplicate member",
        };
        write!(f, "{name}")
    }
}

/// A single warning tied to a member path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Fully-qualified member path (`anise.astro.Frame.__init__`)
    pub path: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.kind)
    }
}

/// Diagnostics accumulated during one generator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a diagnostic
    pub fn warn(&mut self, kind: DiagnosticKind, path: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            path: path.into(),
            message: message.into(),
        };
        tracing::warn!(kind = %diagnostic.kind, path = %diagnostic.path, "{}", diagnostic.message);
        self.items.push(diagnostic);
    }

    /// Recorded diagnostics in order
    #[must_use]
    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Number of diagnostics of the given kind
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
