//! Variable environment.
//!
//! A stack of call frames, each a stack of block scopes. Lookups only walk
//! the current frame, so a callee never sees its caller's locals.

use meta_ir::Name;
use rustc_hash::FxHashMap;

use crate::Value;

type Scope = FxHashMap<Name, Value>;

/// One call frame: the scopes opened by the current procedure's blocks.
#[derive(Debug)]
struct Frame {
    scopes: Vec<Scope>,
}

impl Frame {
    fn new() -> Self {
        Frame {
            scopes: vec![Scope::default()],
        }
    }
}

/// The interpreter's variable environment.
///
/// The current frame is stored separately from the suspended ones, so there
/// is always a frame to bind into.
#[derive(Debug)]
pub struct Environment {
    current: Frame,
    suspended: Vec<Frame>,
}

impl Environment {
    /// An environment with a single empty frame and scope.
    pub fn new() -> Self {
        Environment {
            current: Frame::new(),
            suspended: Vec::new(),
        }
    }

    /// Open a fresh frame for a procedure call.
    pub fn push_frame(&mut self) {
        let caller = std::mem::replace(&mut self.current, Frame::new());
        self.suspended.push(caller);
    }

    /// Close the current frame when a call returns.
    pub fn pop_frame(&mut self) {
        if let Some(caller) = self.suspended.pop() {
            self.current = caller;
        }
    }

    /// Open a block scope in the current frame.
    pub fn push_scope(&mut self) {
        self.current.scopes.push(Scope::default());
    }

    /// Close the innermost block scope.
    pub fn pop_scope(&mut self) {
        let popped = self.current.scopes.pop();
        debug_assert!(popped.is_some(), "pop_scope on empty frame");
    }

    /// Bind a name in the innermost scope. A `let` in an inner scope
    /// shadows an outer binding of the same name.
    pub fn define(&mut self, name: Name, value: Value) {
        if let Some(scope) = self.current.scopes.last_mut() {
            scope.insert(name, value);
        }
    }

    /// Look a name up, innermost scope first, current frame only.
    pub fn lookup(&self, name: Name) -> Option<&Value> {
        self.current
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name))
    }

    /// Mutable lookup, for assignment targets.
    pub fn lookup_mut(&mut self, name: Name) -> Option<&mut Value> {
        self.current
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(&name))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}
