//! Testing utilities for the loader and its users.
//!
//! - **line_engine**: a tiny line-oriented [`ScriptEngine`](crate::ScriptEngine)
//! - **fixtures**: registries and values for controlled tests
//!
//! # Usage
//!
//! ```ignore
//! use cjs_load::testing::{js, registry, LineEngine};
//!
//! let engine = LineEngine::new();
//! let builtins = registry([("fs", js(serde_json::json!({"name": "fs"})))]);
//! ```

pub mod fixtures;
pub mod line_engine;

pub use fixtures::{js, registry};
pub use line_engine::{JsValue, LineEngine, ScriptError};
