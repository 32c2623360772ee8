//! RAII scope guard for the interpreter's environment.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`,
//! so evaluation continues through the guard while the scope it opened is
//! guaranteed to be popped on every exit path, early `return`s and `?`
//! included.

use std::ops::{Deref, DerefMut};

use super::Interpreter;

/// Pops one environment scope when dropped.
pub struct ScopedInterpreter<'guard, 'a> {
    interpreter: &'guard mut Interpreter<'a>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl<'a> Deref for ScopedInterpreter<'_, 'a> {
    type Target = Interpreter<'a>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Open a scope that pops itself when the guard is dropped.
    pub(crate) fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }
}
