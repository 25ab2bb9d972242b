//! Parse error type.

use std::fmt;

use skald_ir::Span;

/// A syntax error found during parsing.
///
/// Parse errors are fatal for evaluation (the tree's error flag refuses
/// it) but not for parsing itself: the parser records the error and
/// synchronizes to the next statement boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at {}: {}", self.span, self.message)
    }
}

impl std::error::Error for ParseError {}
