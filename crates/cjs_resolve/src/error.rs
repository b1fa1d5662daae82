//! Resolution errors and stable error codes.

use std::fmt;

/// Machine-readable discriminators for module system failures.
///
/// The string forms are stable and match what Node-style tooling expects
/// to find in an error's `code` property.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Every resolution strategy was exhausted.
    ModuleNotFound,
    /// The resolved file could not be read.
    ModuleRead,
    /// A module required itself through a chain of nested loads.
    RequireCycle,
}

impl ErrorCode {
    /// The stable string form (`MODULE_NOT_FOUND`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ModuleNotFound => "MODULE_NOT_FOUND",
            ErrorCode::ModuleRead => "ERR_MODULE_READ",
            ErrorCode::RequireCycle => "ERR_REQUIRE_CYCLE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that no resolution strategy could satisfy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Cannot find module '{request}'")]
pub struct ModuleNotFound {
    request: String,
}

impl ModuleNotFound {
    /// Create the error for the original, unmodified request string.
    #[cold]
    pub fn new(request: impl Into<String>) -> Self {
        ModuleNotFound {
            request: request.into(),
        }
    }

    /// The request exactly as the caller passed it.
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Always [`ErrorCode::ModuleNotFound`].
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ModuleNotFound
    }
}
