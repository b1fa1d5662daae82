//! Wiring: one engine, one builtin registry, one filesystem.

use std::io;
use std::path::Path;

use cjs_builtins::{BuiltinRegistry, RegistryCell, RegistryError};
use cjs_load::{HostBindings, Loader, LoaderConfig, ScriptEngine};
use cjs_resolve::{FileSystem, OsFileSystem};

use crate::Require;

/// Everything needed to load modules for one engine.
///
/// The builtin registry is borrowed; everything else is owned.
pub struct ModuleSystem<'r, E: ScriptEngine> {
    engine: E,
    builtins: &'r BuiltinRegistry<E::Value>,
    fs: Box<dyn FileSystem>,
    host: HostBindings<E::Value>,
    config: LoaderConfig,
}

impl<'r, E: ScriptEngine> ModuleSystem<'r, E> {
    /// A system on the real filesystem with default configuration and no
    /// host bindings.
    pub fn new(engine: E, builtins: &'r BuiltinRegistry<E::Value>) -> Self {
        ModuleSystem {
            engine,
            builtins,
            fs: Box::new(OsFileSystem),
            host: HostBindings::new(),
            config: LoaderConfig::default(),
        }
    }

    /// Borrow the registry of a process-wide cell.
    ///
    /// Fails with [`RegistryError::NotReady`] until the cell has finished
    /// initializing.
    pub fn from_cell(engine: E, cell: &'r RegistryCell<E::Value>) -> Result<Self, RegistryError> {
        Ok(Self::new(engine, cell.get()?))
    }

    #[must_use]
    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: HostBindings<E::Value>) -> Self {
        let missing: Vec<_> = host.missing_ambient().collect();
        if !missing.is_empty() {
            tracing::debug!(?missing, "host bindings without some ambient globals");
        }
        self.host = host;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn builtins(&self) -> &'r BuiltinRegistry<E::Value> {
        self.builtins
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        &*self.fs
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// A loader over this system's collaborators.
    pub fn loader(&self) -> Loader<'_, E> {
        Loader::new(&self.engine, self.builtins, &*self.fs, &self.host, &self.config)
    }

    /// A `require` for code living in `filename`.
    pub fn create_require(&self, filename: impl AsRef<Path>) -> Require<'_, E> {
        Require::for_file(self, filename.as_ref())
    }

    /// A `require` relative to `dir`.
    pub fn require_in(&self, dir: impl AsRef<Path>) -> Require<'_, E> {
        Require::in_dir(self, dir.as_ref())
    }

    /// A `require` relative to the process working directory.
    pub fn require_from_current_dir(&self) -> io::Result<Require<'_, E>> {
        Require::from_current_dir(self)
    }
}
