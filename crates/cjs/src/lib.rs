//! CJS - CommonJS-style `require` for embedders.
//!
//! ```text
//! ModuleSystem ─── create_require("/project/main.js") ──► Require
//!   │                                                      ├── call("./a")
//!   │                                                      └── resolve("left-pad")
//!   ├── ScriptEngine      (runs module source)
//!   ├── BuiltinRegistry   (fs, path, ... and node: aliases)
//!   ├── FileSystem        (OsFileSystem by default)
//!   └── LoaderConfig      (extensions, search order, cycle policy)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cjs::{init_tracing, BuiltinRegistry, ModuleSystem};
//!
//! init_tracing();
//! let builtins = BuiltinRegistry::from_entries([("fs", fs_module)]);
//! let system = ModuleSystem::new(engine, &builtins);
//! let require = system.create_require("/project/main.js");
//! let exports = require.call("./lib/util")?;
//! ```

mod logging;
mod require;
mod system;

pub use logging::{init_tracing, LOG_ENV};
pub use require::Require;
pub use system::ModuleSystem;

pub use cjs_builtins::{
    strip_builtin_prefix, BuiltinNames, BuiltinRegistry, NameList, RegistryCell, RegistryError,
    RegistryState, BUILTIN_PREFIX, NODE_BUILTIN_MODULES,
};
pub use cjs_load::{
    CyclePolicy, ExecutionScope, ExportsSlot, HostBindings, LoadError, Loader, LoaderConfig,
    ModuleObject, ScriptEngine, AMBIENT_GLOBALS,
};
pub use cjs_resolve::{
    ErrorCode, FileSystem, MemoryFileSystem, ModuleNotFound, OsFileSystem, Resolved, Resolver,
    ResolverConfig, SearchOrder,
};
