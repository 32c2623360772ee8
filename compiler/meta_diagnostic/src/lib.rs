//! Diagnostic and error reporting for the Meta interpreter.
//!
//! Every pipeline failure is converted into a [`Diagnostic`] carrying an
//! [`ErrorCode`], a message, and labeled source spans. The
//! [`TerminalEmitter`] renders diagnostics with `file:line:column`
//! positions computed through [`span_utils::LineOffsetTable`].

mod diagnostic;
mod emitter;
mod error_code;
mod source;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::{DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use source::SourceFile;
