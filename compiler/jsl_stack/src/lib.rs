//! Native stack growth for nested interpreter invocations.
//!
//! Every JSL function call and `try` body re-enters the interpreter loop
//! through ordinary Rust recursion. Wrapping each re-entry in
//! [`ensure_sufficient_stack`] keeps the native stack from overflowing before
//! the interpreter's own call-depth limit is reached, so runaway recursion is
//! reported as a language-level resource error instead of aborting the host.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).
//!
//! # Configuration
//!
//! - **Red zone**: 128KB - one interpreter re-entry (loop frame, evaluator
//!   frame, environment clone) must fit comfortably inside it
//! - **Growth size**: 2MB - each growth allocates this much additional space

/// Minimum stack space to keep available (128KB red zone).
const RED_ZONE: usize = 128 * 1024;

/// Stack space to allocate when growing (2MB).
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, a new stack
/// segment is allocated before calling `f`.
///
/// # Example
///
/// ```
/// use jsl_stack::ensure_sufficient_stack;
///
/// fn count_down(n: u64) -> u64 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { count_down(n - 1) + 1 })
/// }
///
/// assert_eq!(count_down(1_000), 1_000);
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining native stack in bytes, when the platform can tell.
///
/// Used by the interpreter's debug logging around nested invocations.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// WASM version - the remaining stack is unknown.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
