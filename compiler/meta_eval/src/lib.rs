//! Tree-walking evaluator for Meta.
//!
//! Executes a resolved translation unit starting at `main`. The value
//! model is copy-on-bind: `let`, assignment, argument passing, struct
//! literal fields, and returns all store independent copies, so no two
//! bindings ever alias.
//!
//! All runtime failures are fatal and carry a span; the CLI renders them
//! as diagnostics.

mod environment;
mod errors;
mod interpreter;
mod stack;
mod value;

pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind};
pub use interpreter::{run, Interpreter, ScopedInterpreter, MAX_CALL_DEPTH};
pub use value::{StructValue, Value};
