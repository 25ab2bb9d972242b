//! Soft-error diagnostics.
//!
//! The evaluator recovers from most failures locally: the offending
//! expression evaluates to void, a diagnostic is recorded here, and the
//! sibling statements still run. Diagnostics are logged through
//! `tracing` as they occur and kept in order for the driver to print
//! after evaluation.

use std::fmt;

use skald_ir::Span;

/// Category of a soft evaluation failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An operand had the wrong kind for an operator, or a member
    /// expression's left side was not a block.
    TypeMismatch,
    /// An operator spelling the evaluator does not implement.
    UnhandledOperator,
    /// A node kind the evaluator does not implement.
    UnhandledNodeKind,
    /// A dotted member path that could not be resolved or created.
    UnresolvedMember,
    /// A literal whose text failed to parse.
    LiteralParse,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::TypeMismatch => "type mismatch",
            DiagnosticKind::UnhandledOperator => "unhandled operator",
            DiagnosticKind::UnhandledNodeKind => "unhandled node kind",
            DiagnosticKind::UnresolvedMember => "unresolved member",
            DiagnosticKind::LiteralParse => "literal parse",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded soft failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Option<Span>) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} at {}: {}", self.kind, span, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Ordered sink of soft failures for one evaluation.
#[derive(Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Record a diagnostic, logging it as it happens.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = diagnostic.kind.as_str(),
            span = ?diagnostic.span,
            "{}",
            diagnostic.message
        );
        self.items.push(diagnostic);
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Drain the recorded diagnostics, leaving the sink empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.items)
    }
}
