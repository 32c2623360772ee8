//! Parse error types.

use std::fmt;

use meta_diagnostic::{Diagnostic, ErrorCode};
use meta_ir::Span;

/// Structural parse error.
///
/// The parser does not recover: the first error aborts parsing of the
/// translation unit and surfaces here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Where the unexpected token sits.
    pub span: Span,
    /// What the grammar required, e.g. "`;`" or "an expression".
    pub expected: &'static str,
    /// Description of the token actually found.
    pub found: &'static str,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Convert into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::Parse)
            .with_message(self.to_string())
            .with_label(self.span, format!("expected {} here", self.expected))
    }
}
