//! Stack growth for nested `require` chains.
//!
//! A module's `require` runs inside the engine's `execute`, which runs
//! inside the parent's `require`, and so on: an `a -> b -> c -> ...`
//! dependency chain is one native call chain through loader and engine
//! frames, as deep as the chain is long. Under `CyclePolicy::Reexecute` a
//! cycle makes it as deep as the modules let it get. Each load therefore
//! checks the remaining stack before entering the engine and moves to a
//! fresh segment when it runs low, so chain length is bounded by memory
//! rather than by the thread's fixed stack.

/// Remaining stack below which a load switches to a new segment.
///
/// Must cover one load's worth of loader frames plus the engine's own
/// frames up to its next nested `require`.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run one module execution with at least [`RED_ZONE`] bytes of stack.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(execute: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, execute)
}

/// The WASM runtime owns the stack; the execution runs in place.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(execute: impl FnOnce() -> R) -> R {
    execute()
}
