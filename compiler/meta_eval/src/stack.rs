//! Stack safety for deep recursion.
//!
//! The call-depth cap is a language rule, not a crash guard: the native
//! stack must survive until the counter trips. Interpreting one Meta call
//! costs several native frames, so the stack is grown on demand and the
//! depth counter stays the only limit.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// Grows the stack when less than the red zone remains, so deeply nested
/// evaluation never overflows the native stack.
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
