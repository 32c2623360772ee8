//! Runtime errors.
//!
//! Every error carries the span of the expression or statement that raised
//! it. All runtime errors are fatal; there is no catch mechanism in the
//! language.

use std::error::Error;
use std::fmt;

use meta_diagnostic::{Diagnostic, ErrorCode};
use meta_ir::Span;

/// A fatal runtime error.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Span,
}

/// What went wrong.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum EvalErrorKind {
    /// A name was read before any binding introduced it.
    UndefinedVariable { name: &'static str },
    /// A call target did not resolve. The resolver rejects these before
    /// execution; this is the evaluator's own re-check.
    UnknownFunction { name: String },
    /// Field access or assignment named a field the struct lacks.
    UnknownField {
        type_name: &'static str,
        field: &'static str,
    },
    /// An operation was applied to a value of the wrong type.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Checked arithmetic overflowed `i32`.
    Overflow { op: &'static str },
    /// Division by zero.
    DivisionByZero,
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// The call depth limit was exceeded.
    StackOverflow { limit: usize },
}

impl EvalError {
    pub fn undefined_variable(name: &'static str, span: Span) -> Self {
        EvalError {
            kind: EvalErrorKind::UndefinedVariable { name },
            span,
        }
    }

    pub fn unknown_function(name: impl Into<String>, span: Span) -> Self {
        EvalError {
            kind: EvalErrorKind::UnknownFunction { name: name.into() },
            span,
        }
    }

    pub fn unknown_field(type_name: &'static str, field: &'static str, span: Span) -> Self {
        EvalError {
            kind: EvalErrorKind::UnknownField { type_name, field },
            span,
        }
    }

    pub fn type_mismatch(expected: &'static str, found: &'static str, span: Span) -> Self {
        EvalError {
            kind: EvalErrorKind::TypeMismatch { expected, found },
            span,
        }
    }

    pub fn overflow(op: &'static str, span: Span) -> Self {
        EvalError {
            kind: EvalErrorKind::Overflow { op },
            span,
        }
    }

    pub fn division_by_zero(span: Span) -> Self {
        EvalError {
            kind: EvalErrorKind::DivisionByZero,
            span,
        }
    }

    pub fn arity_mismatch(
        name: impl Into<String>,
        expected: usize,
        found: usize,
        span: Span,
    ) -> Self {
        EvalError {
            kind: EvalErrorKind::ArityMismatch {
                name: name.into(),
                expected,
                found,
            },
            span,
        }
    }

    pub fn stack_overflow(limit: usize, span: Span) -> Self {
        EvalError {
            kind: EvalErrorKind::StackOverflow { limit },
            span,
        }
    }

    fn code(&self) -> ErrorCode {
        match self.kind {
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::UnknownVariable,
            EvalErrorKind::UnknownFunction { .. } => ErrorCode::UnknownFunction,
            EvalErrorKind::UnknownField { .. } => ErrorCode::UnknownField,
            EvalErrorKind::TypeMismatch { .. } | EvalErrorKind::ArityMismatch { .. } => {
                ErrorCode::TypeMismatch
            }
            EvalErrorKind::Overflow { .. } | EvalErrorKind::DivisionByZero => {
                ErrorCode::Arithmetic
            }
            EvalErrorKind::StackOverflow { .. } => ErrorCode::StackOverflow,
        }
    }

    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span, "while evaluating this")
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EvalErrorKind::UndefinedVariable { name } => {
                write!(f, "undefined variable `{name}`")
            }
            EvalErrorKind::UnknownFunction { name } => {
                write!(f, "unknown procedure `{name}`")
            }
            EvalErrorKind::UnknownField { type_name, field } => {
                write!(f, "struct `{type_name}` has no field `{field}`")
            }
            EvalErrorKind::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            EvalErrorKind::Overflow { op } => {
                write!(f, "arithmetic overflow in `{op}`")
            }
            EvalErrorKind::DivisionByZero => write!(f, "division by zero"),
            EvalErrorKind::ArityMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "procedure `{name}` takes {expected} argument(s), {found} supplied"
            ),
            EvalErrorKind::StackOverflow { limit } => {
                write!(f, "call depth limit of {limit} exceeded")
            }
        }
    }
}

impl Error for EvalError {}
