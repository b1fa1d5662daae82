//! CJS Builtins - registry of host-provided built-in modules.
//!
//! Built-in modules are looked up by name and bypass file resolution and
//! execution entirely. Every module is reachable under its bare name (`fs`)
//! and under the `node:`-prefixed alias (`node:fs`), and both keys hand out
//! the very same value.
//!
//! # Lifecycle
//!
//! ```text
//! RegistryCell::new()          Uninitialized
//!     │ initialize(build)
//!     ▼
//! build() on a rayon pool      Initializing
//!     │ all loads succeed
//!     ▼
//! get() -> &BuiltinRegistry    Ready (immutable from here on)
//! ```
//!
//! The resolver only needs to know *whether* a name is built in, so it talks
//! to the narrow [`BuiltinNames`] trait instead of the value-carrying
//! registry.

mod cell;
mod error;
mod names;
mod registry;

pub use cell::{RegistryCell, RegistryState};
pub use error::RegistryError;
pub use names::{strip_builtin_prefix, BuiltinNames, NameList, BUILTIN_PREFIX, NODE_BUILTIN_MODULES};
pub use registry::{BuiltinEntry, BuiltinRegistry};
