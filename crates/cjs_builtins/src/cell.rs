//! One-time initialized holder for a process-wide builtin registry.
//!
//! The cell is `const`-constructible so it can live in a `static`. It moves
//! through `Uninitialized → Initializing → Ready` exactly once; readers go
//! through [`RegistryCell::get`], which refuses to hand out a registry that
//! is not ready yet.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

use crate::{BuiltinRegistry, RegistryError};

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const READY: u8 = 2;

/// Lifecycle state of a [`RegistryCell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryState {
    /// No initialization has started (or the last attempt failed).
    Uninitialized,
    /// An initialization is running.
    Initializing,
    /// The registry is populated and immutable.
    Ready,
}

/// Process-wide builtin registry guarded by an explicit ready state.
pub struct RegistryCell<V> {
    state: AtomicU8,
    registry: OnceLock<BuiltinRegistry<V>>,
}

impl<V> RegistryCell<V> {
    /// Create an uninitialized cell.
    pub const fn new() -> Self {
        RegistryCell {
            state: AtomicU8::new(UNINITIALIZED),
            registry: OnceLock::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RegistryState {
        match self.state.load(Ordering::Acquire) {
            UNINITIALIZED => RegistryState::Uninitialized,
            INITIALIZING => RegistryState::Initializing,
            _ => RegistryState::Ready,
        }
    }

    /// Run `build` and publish its registry.
    ///
    /// Only one initialization may ever succeed. A concurrent or repeated
    /// call fails with [`RegistryError::AlreadyInitialized`]. If `build`
    /// fails the cell returns to `Uninitialized` so startup can be retried.
    pub fn initialize<F>(&self, build: F) -> Result<&BuiltinRegistry<V>, RegistryError>
    where
        F: FnOnce() -> Result<BuiltinRegistry<V>, RegistryError>,
    {
        if self
            .state
            .compare_exchange(UNINITIALIZED, INITIALIZING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(RegistryError::AlreadyInitialized);
        }

        match build() {
            Ok(registry) => {
                // The state machine admits a single writer, so the slot is empty.
                let registry = self.registry.get_or_init(|| registry);
                self.state.store(READY, Ordering::Release);
                tracing::debug!(modules = registry.len(), "builtin registry ready");
                Ok(registry)
            }
            Err(err) => {
                self.state.store(UNINITIALIZED, Ordering::Release);
                tracing::warn!(error = %err, "builtin registry initialization failed");
                Err(err)
            }
        }
    }

    /// The registry, once ready.
    pub fn get(&self) -> Result<&BuiltinRegistry<V>, RegistryError> {
        if self.state.load(Ordering::Acquire) != READY {
            return Err(RegistryError::NotReady);
        }
        self.registry.get().ok_or(RegistryError::NotReady)
    }
}

impl<V> Default for RegistryCell<V> {
    fn default() -> Self {
        Self::new()
    }
}
