//! Lexical error types.

use std::error::Error;
use std::fmt;

use meta_diagnostic::{Diagnostic, ErrorCode};
use meta_ir::Span;

/// Error produced while lexing.
///
/// The lexer stops at the first error; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    UnterminatedString { span: Span },
    IntOutOfRange { span: Span },
    IllegalCharacter { ch: char, span: Span },
}

impl LexError {
    /// The source span where lexing failed.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::IntOutOfRange { span }
            | LexError::IllegalCharacter { span, .. } => *span,
        }
    }

    /// Convert into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(ErrorCode::Lex)
            .with_message(self.to_string())
            .with_label(self.span(), "lexing stopped here");
        match self {
            LexError::UnterminatedString { .. } => {
                diag.with_note("string literals must close with `\"` on the same line")
            }
            LexError::IntOutOfRange { .. } => {
                diag.with_note(format!("`i32` values range from {} to {}", i32::MIN, i32::MAX))
            }
            LexError::IllegalCharacter { .. } => diag,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString { .. } => write!(f, "unterminated string literal"),
            LexError::IntOutOfRange { .. } => {
                write!(f, "integer literal out of range for `i32`")
            }
            LexError::IllegalCharacter { ch, .. } => write!(f, "illegal character `{ch}`"),
        }
    }
}

impl Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let err = LexError::IllegalCharacter {
            ch: '@',
            span: Span::new(4, 5),
        };
        assert_eq!(err.to_string(), "illegal character `@`");
        assert_eq!(err.span(), Span::new(4, 5));
    }

    #[test]
    fn test_to_diagnostic() {
        let err = LexError::UnterminatedString {
            span: Span::new(8, 9),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::Lex);
        assert_eq!(diag.primary_span(), Some(Span::new(8, 9)));
    }
}
