//! `require`: resolve, read, execute, return exports.
//!
//! ```text
//! load(request, base_dir)
//!   ├── builtin registry hit      → registered value (shared, never re-run)
//!   ├── Resolver::resolve         → ModuleNotFound
//!   ├── cycle check               → LoadError::Cycle (CyclePolicy::Reject)
//!   ├── FileSystem::read_to_string → LoadError::Read
//!   └── ScriptEngine::execute in a fresh ExecutionScope
//!         └── exports slot value
//! ```
//!
//! There is no module cache: each load of a file executes it again and
//! produces a new exports value.

use std::path::{Path, PathBuf};

use cjs_builtins::{strip_builtin_prefix, BuiltinRegistry};
use cjs_resolve::{FileSystem, ModuleNotFound, Resolved, Resolver};

use crate::scope::Lineage;
use crate::stack::ensure_sufficient_stack;
use crate::{CyclePolicy, ExecutionScope, HostBindings, LoadError, LoaderConfig, ScriptEngine};

/// Loads modules for one engine.
///
/// A `Loader` only borrows its collaborators, so it is `Copy` and can be
/// handed to every execution scope.
pub struct Loader<'a, E: ScriptEngine> {
    engine: &'a E,
    builtins: &'a BuiltinRegistry<E::Value>,
    fs: &'a dyn FileSystem,
    host: &'a HostBindings<E::Value>,
    config: &'a LoaderConfig,
}

impl<E: ScriptEngine> Clone for Loader<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ScriptEngine> Copy for Loader<'_, E> {}

impl<'a, E: ScriptEngine> Loader<'a, E> {
    pub fn new(
        engine: &'a E,
        builtins: &'a BuiltinRegistry<E::Value>,
        fs: &'a dyn FileSystem,
        host: &'a HostBindings<E::Value>,
        config: &'a LoaderConfig,
    ) -> Self {
        Loader {
            engine,
            builtins,
            fs,
            host,
            config,
        }
    }

    pub fn engine(&self) -> &'a E {
        self.engine
    }

    pub fn builtins(&self) -> &'a BuiltinRegistry<E::Value> {
        self.builtins
    }

    pub fn host_bindings(&self) -> &'a HostBindings<E::Value> {
        self.host
    }

    pub fn config(&self) -> &'a LoaderConfig {
        self.config
    }

    /// The resolver this loader uses, sharing its builtins and filesystem.
    pub fn resolver(&self) -> Resolver<'a> {
        Resolver::new(self.builtins, self.fs, &self.config.resolver)
    }

    /// Resolve without loading.
    pub fn resolve(&self, request: &str, base_dir: &Path) -> Result<Resolved, ModuleNotFound> {
        self.resolver().resolve(request, base_dir)
    }

    /// Load `request` relative to `base_dir` and return its exports.
    ///
    /// Builtins come straight from the registry. Anything else is resolved,
    /// read and executed in a fresh scope. Errors raised by the module's
    /// code, including failures of its own nested `require` calls, are
    /// returned exactly as the engine produced them.
    pub fn load(&self, request: &str, base_dir: &Path) -> Result<E::Value, E::Error> {
        self.load_within(request, base_dir, None)
    }

    #[tracing::instrument(level = "debug", skip(self, lineage))]
    pub(crate) fn load_within(
        &self,
        request: &str,
        base_dir: &Path,
        lineage: Option<&Lineage<'_>>,
    ) -> Result<E::Value, E::Error> {
        if let Some(value) = self.builtin(request) {
            tracing::debug!("builtin module");
            return Ok(value.clone());
        }

        let path = match self.resolve(request, base_dir).map_err(LoadError::from)? {
            Resolved::File(path) => path,
            // The registry check above is what decides builtin-ness for
            // loading; a resolver-only builtin has no value to hand out.
            Resolved::Builtin(_) => return Err(LoadError::from(ModuleNotFound::new(request)).into()),
        };

        if let Some(lineage) = lineage.filter(|lineage| lineage.contains(&path)) {
            match self.config.cycle_policy {
                CyclePolicy::Reject => {
                    let mut chain = lineage.to_chain();
                    chain.push(path);
                    tracing::debug!(depth = chain.len(), "circular require rejected");
                    return Err(LoadError::Cycle { chain }.into());
                }
                CyclePolicy::Reexecute => {
                    tracing::warn!(path = %path.display(), "re-executing a module that is still loading");
                }
            }
        }

        self.execute_file(path, lineage)
    }

    fn builtin(&self, request: &str) -> Option<&'a E::Value> {
        self.builtins.get(strip_builtin_prefix(request))
    }

    fn execute_file(
        &self,
        path: PathBuf,
        lineage: Option<&Lineage<'_>>,
    ) -> Result<E::Value, E::Error> {
        let source = self
            .fs
            .read_to_string(&path)
            .map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), bytes = source.len(), "executing module");
        let scope = ExecutionScope::new(*self, path, lineage, self.engine.empty_exports());
        ensure_sufficient_stack(|| self.engine.execute(&source, &scope))?;
        Ok(scope.into_exports())
    }
}
