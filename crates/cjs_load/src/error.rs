//! Loader errors.

use std::io;
use std::path::{Path, PathBuf};

use cjs_resolve::{ErrorCode, ModuleNotFound};

/// Failure raised by the loader itself.
///
/// Errors raised by a module's own code never pass through this type; they
/// travel through [`ScriptEngine::Error`](crate::ScriptEngine::Error)
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The request did not resolve.
    #[error(transparent)]
    NotFound(#[from] ModuleNotFound),

    /// The request resolved, but the file could not be read.
    #[error("Cannot read module '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A module required itself, directly or through other modules.
    ///
    /// `chain` runs from the outermost load to the repeated file.
    #[error("Circular require: {}", display_chain(.chain))]
    Cycle { chain: Vec<PathBuf> },
}

impl LoadError {
    /// Stable code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            LoadError::NotFound(_) => ErrorCode::ModuleNotFound,
            LoadError::Read { .. } => ErrorCode::ModuleRead,
            LoadError::Cycle { .. } => ErrorCode::RequireCycle,
        }
    }

    /// The unresolved request, for [`LoadError::NotFound`].
    pub fn request(&self) -> Option<&str> {
        match self {
            LoadError::NotFound(err) => Some(err.request()),
            _ => None,
        }
    }

    /// The file involved, where there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            LoadError::NotFound(_) => None,
            LoadError::Read { path, .. } => Some(path),
            LoadError::Cycle { chain } => chain.last().map(PathBuf::as_path),
        }
    }
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
