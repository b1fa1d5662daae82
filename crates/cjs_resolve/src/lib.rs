//! CJS Resolve - deterministic module resolution.
//!
//! Maps a request (`./a`, `left-pad`, `node:fs`) and a base directory to
//! the absolute path of a single regular file, or reports that the request
//! names a builtin module.
//!
//! # Architecture
//!
//! ```text
//! Resolver::resolve(request, base_dir)
//!   ├── BuiltinNames::contains      builtin? → Resolved::Builtin(request)
//!   ├── resolve_file / resolve_directory   ./ ../ /
//!   └── search_paths → resolve_file / resolve_directory   bare names
//!         │
//!         ▼
//!   FileSystem (OsFileSystem | MemoryFileSystem)
//! ```
//!
//! Nothing is cached: manifests are reparsed and files re-probed on every
//! call, so results always reflect the current filesystem.

mod config;
mod error;
mod fs;
pub mod lexical;
mod manifest;
mod resolver;
mod search_paths;

pub use config::{ResolverConfig, SEARCH_ORDER_ENV};
pub use error::{ErrorCode, ModuleNotFound};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use manifest::PackageManifest;
pub use resolver::{Resolved, Resolver};
pub use search_paths::{search_paths, ParseSearchOrderError, SearchOrder};
