//! Grammar modules.
//!
//! Each module extends [`Parser`](crate::Parser) with methods for a group
//! of grammar productions:
//!
//! - [`item`]: top-level items (`struct`, `impl`, `proc`) and types
//! - [`stmt`]: statements and blocks
//! - [`expr`]: expressions (precedence: comparison < additive <
//!   multiplicative < postfix/primary)

mod expr;
mod item;
mod stmt;
