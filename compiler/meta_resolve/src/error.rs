//! Resolution errors.

use std::error::Error;
use std::fmt;

use meta_diagnostic::{Diagnostic, ErrorCode};
use meta_ir::Span;

/// An error produced while resolving declarations, before any code runs.
///
/// Names are the interner's leaked strings, so the error stays `'static`
/// and cheap to move around.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ResolveError {
    /// Two structs share a name.
    DuplicateStruct {
        name: &'static str,
        span: Span,
        first: Span,
    },
    /// A struct declares the same field twice.
    DuplicateField {
        struct_name: &'static str,
        field: &'static str,
        span: Span,
    },
    /// Two free procedures share a name.
    DuplicateProc {
        name: &'static str,
        span: Span,
        first: Span,
    },
    /// Two associated procedures share a `(type, name)` key.
    DuplicateAssociated {
        type_name: &'static str,
        name: &'static str,
        span: Span,
        first: Span,
    },
    /// A procedure declares the same parameter twice.
    DuplicateParam {
        proc_name: &'static str,
        param: &'static str,
        span: Span,
    },
    /// A type annotation names neither a primitive nor a declared struct.
    UnknownType { name: &'static str, span: Span },
    /// An `impl` block targets an undeclared struct.
    ImplUnknownType { name: &'static str, span: Span },
    /// A struct literal names an undeclared struct.
    LiteralUnknownType { name: &'static str, span: Span },
    /// A struct literal omits a declared field.
    MissingField {
        type_name: &'static str,
        field: &'static str,
        span: Span,
    },
    /// A struct literal supplies a field the struct does not declare.
    ExtraField {
        type_name: &'static str,
        field: &'static str,
        span: Span,
    },
    /// A struct literal initializes the same field twice.
    RepeatedField {
        type_name: &'static str,
        field: &'static str,
        span: Span,
    },
    /// A call names an undeclared free procedure.
    UnknownFunction { name: &'static str, span: Span },
    /// A call names an undeclared associated procedure.
    UnknownAssociated {
        type_name: &'static str,
        name: &'static str,
        span: Span,
    },
    /// No `main` procedure is declared.
    MissingMain,
    /// `main` takes parameters.
    MainHasParams { span: Span },
    /// `main` declares a return type other than `i32`.
    MainBadReturn { span: Span },
}

impl ResolveError {
    /// The primary span, if the error points at source.
    pub fn span(&self) -> Option<Span> {
        match self {
            ResolveError::DuplicateStruct { span, .. }
            | ResolveError::DuplicateField { span, .. }
            | ResolveError::DuplicateProc { span, .. }
            | ResolveError::DuplicateAssociated { span, .. }
            | ResolveError::DuplicateParam { span, .. }
            | ResolveError::UnknownType { span, .. }
            | ResolveError::ImplUnknownType { span, .. }
            | ResolveError::LiteralUnknownType { span, .. }
            | ResolveError::MissingField { span, .. }
            | ResolveError::ExtraField { span, .. }
            | ResolveError::RepeatedField { span, .. }
            | ResolveError::UnknownFunction { span, .. }
            | ResolveError::UnknownAssociated { span, .. }
            | ResolveError::MainHasParams { span }
            | ResolveError::MainBadReturn { span } => Some(*span),
            ResolveError::MissingMain => None,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            ResolveError::DuplicateStruct { .. }
            | ResolveError::DuplicateField { .. }
            | ResolveError::DuplicateProc { .. }
            | ResolveError::DuplicateAssociated { .. }
            | ResolveError::DuplicateParam { .. } => ErrorCode::DuplicateDecl,
            ResolveError::UnknownType { .. }
            | ResolveError::ImplUnknownType { .. }
            | ResolveError::LiteralUnknownType { .. } => ErrorCode::UnknownType,
            ResolveError::MissingField { .. }
            | ResolveError::ExtraField { .. }
            | ResolveError::RepeatedField { .. } => ErrorCode::FieldMismatch,
            ResolveError::UnknownFunction { .. } | ResolveError::UnknownAssociated { .. } => {
                ErrorCode::UnknownFunction
            }
            ResolveError::MissingMain
            | ResolveError::MainHasParams { .. }
            | ResolveError::MainBadReturn { .. } => ErrorCode::EntryPoint,
        }
    }

    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        let diag = match self.span() {
            Some(span) => diag.with_label(span, "here"),
            None => diag,
        };
        match self {
            ResolveError::DuplicateStruct { first, .. }
            | ResolveError::DuplicateProc { first, .. }
            | ResolveError::DuplicateAssociated { first, .. } => {
                diag.with_secondary_label(*first, "first declared here")
            }
            ResolveError::MissingMain => {
                diag.with_note("declare `proc main(): i32 { ... }` or `proc main() { ... }`")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::DuplicateStruct { name, .. } => {
                write!(f, "struct `{name}` is declared more than once")
            }
            ResolveError::DuplicateField {
                struct_name, field, ..
            } => write!(f, "struct `{struct_name}` declares field `{field}` twice"),
            ResolveError::DuplicateProc { name, .. } => {
                write!(f, "procedure `{name}` is declared more than once")
            }
            ResolveError::DuplicateAssociated {
                type_name, name, ..
            } => write!(
                f,
                "associated procedure `{type_name}::{name}` is declared more than once"
            ),
            ResolveError::DuplicateParam {
                proc_name, param, ..
            } => write!(
                f,
                "procedure `{proc_name}` declares parameter `{param}` twice"
            ),
            ResolveError::UnknownType { name, .. } => write!(f, "unknown type `{name}`"),
            ResolveError::ImplUnknownType { name, .. } => {
                write!(f, "`impl` block for unknown type `{name}`")
            }
            ResolveError::LiteralUnknownType { name, .. } => {
                write!(f, "struct literal of unknown type `{name}`")
            }
            ResolveError::MissingField {
                type_name, field, ..
            } => write!(f, "struct literal of `{type_name}` is missing field `{field}`"),
            ResolveError::ExtraField {
                type_name, field, ..
            } => write!(
                f,
                "struct `{type_name}` has no field `{field}`"
            ),
            ResolveError::RepeatedField {
                type_name, field, ..
            } => write!(
                f,
                "field `{field}` of `{type_name}` is initialized twice"
            ),
            ResolveError::UnknownFunction { name, .. } => {
                write!(f, "call to unknown procedure `{name}`")
            }
            ResolveError::UnknownAssociated {
                type_name, name, ..
            } => write!(f, "call to unknown associated procedure `{type_name}::{name}`"),
            ResolveError::MissingMain => write!(f, "no `main` procedure declared"),
            ResolveError::MainHasParams { .. } => {
                write!(f, "`main` must not take parameters")
            }
            ResolveError::MainBadReturn { .. } => {
                write!(f, "`main` must return `i32` or nothing")
            }
        }
    }
}

impl Error for ResolveError {}
