//! The seam between the loader and whatever actually runs module code.

use crate::{ExecutionScope, LoadError};

/// Executes module source text.
///
/// The loader owns resolution, reading and scoping; the engine only runs
/// `source` with the bindings exposed by `scope` (`require`, `exports`,
/// `module.exports`, `__dirname`, `__filename` and the host globals).
///
/// Implementations must not share mutable state between two calls to
/// [`execute`](ScriptEngine::execute): every execution starts from a fresh
/// scope, and anything a module sets at its top level dies with it.
pub trait ScriptEngine: Sized {
    /// A runtime value: exports, builtin modules, host globals.
    ///
    /// Cloning must preserve identity where the engine has one (an `Arc`
    /// clone, an object handle), so that a builtin returned twice is the
    /// same object both times.
    type Value: Clone + Send + Sync + 'static;

    /// Error raised while running module code.
    ///
    /// Loader failures inside a nested `require` are converted with
    /// `From<LoadError>` and propagate through the requiring module like any
    /// other error it raises.
    type Error: From<LoadError>;

    /// The initial value of `exports` for a newly loaded module (an empty object).
    fn empty_exports(&self) -> Self::Value;

    /// Run `source` to completion.
    fn execute(&self, source: &str, scope: &ExecutionScope<'_, Self>) -> Result<(), Self::Error>;
}
