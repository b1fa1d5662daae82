//! Errors raised while building or reading the builtin registry.

/// Misuse of the registry lifecycle, or a failed builtin load.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The registry was read before initialization completed.
    #[error("builtin registry used before initialization completed")]
    NotReady,
    /// `initialize` was called while initializing or after the registry became ready.
    #[error("builtin registry is already initialized")]
    AlreadyInitialized,
    /// Loading one of the builtin modules failed.
    #[error("failed to load builtin module '{name}': {message}")]
    Load {
        /// Canonical name of the module that failed.
        name: String,
        /// Rendered error from the module loader.
        message: String,
    },
}
