//! CJS Load - runs CommonJS-style modules.
//!
//! Ties the builtin registry and the resolver to a [`ScriptEngine`]:
//!
//! ```text
//! Loader::load("./a", "/project")
//!   ├── BuiltinRegistry        node:fs → shared value
//!   ├── Resolver               ./a → /project/a.js
//!   ├── FileSystem             source text
//!   └── ScriptEngine::execute  ExecutionScope {
//!                                require, exports, module.exports,
//!                                __dirname, __filename, host globals }
//! ```
//!
//! The crate does not ship an interpreter. [`testing::LineEngine`] is a
//! line-oriented stand-in used by the tests of this crate and its users.

mod config;
mod engine;
mod error;
mod loader;
mod scope;
mod stack;
pub mod testing;

pub use config::{CyclePolicy, LoaderConfig, ParseCyclePolicyError, CYCLE_POLICY_ENV};
pub use engine::ScriptEngine;
pub use error::LoadError;
pub use loader::Loader;
pub use scope::{ExecutionScope, ExportsSlot, HostBindings, ModuleObject, AMBIENT_GLOBALS};
pub use stack::ensure_sufficient_stack;
