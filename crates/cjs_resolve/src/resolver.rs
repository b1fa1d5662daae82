//! The resolution algorithm.
//!
//! ## Order
//!
//! 1. **Builtin**: `fs` / `node:fs` resolve to themselves, untouched.
//! 2. **Path** (`./`, `../`, `/`): file probing, then directory resolution.
//!    A path request that matches nothing fails right there.
//! 3. **Installed package**: every `node_modules` search directory, each
//!    trying file probing and then directory resolution.
//!
//! ## File probing
//!
//! `x`, `x.js`, `x.json`, `x.node`; the first regular file wins.
//!
//! ## Directory resolution
//!
//! `dir/package.json` with a string `main` → probe `dir/main`, then
//! `dir/main/index`. Without a usable manifest → probe `dir/index`.
//! Manifest read and parse errors are swallowed.

use std::fmt;
use std::path::{Path, PathBuf};

use cjs_builtins::{strip_builtin_prefix, BuiltinNames};

use crate::lexical::{absolutize, is_path_request, join_below, resolve_against, with_suffix};
use crate::{search_paths, FileSystem, ModuleNotFound, PackageManifest, ResolverConfig};

/// Outcome of a successful resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resolved {
    /// A builtin module; holds the request exactly as given (`node:fs` stays `node:fs`).
    Builtin(String),
    /// An absolute path to a regular file.
    File(PathBuf),
}

impl Resolved {
    /// The file path, for file resolutions.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Resolved::File(path) => Some(path),
            Resolved::Builtin(_) => None,
        }
    }

    /// Returns `true` for builtin resolutions.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Resolved::Builtin(_))
    }

    /// The string form: the builtin request, or the file path.
    pub fn to_string_lossy(&self) -> String {
        match self {
            Resolved::Builtin(request) => request.clone(),
            Resolved::File(path) => path.to_string_lossy().into_owned(),
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Builtin(request) => f.write_str(request),
            Resolved::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Stateless resolver over a builtin name view and a filesystem.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    builtins: &'a dyn BuiltinNames,
    fs: &'a dyn FileSystem,
    config: &'a ResolverConfig,
}

impl<'a> Resolver<'a> {
    /// Create a resolver.
    pub fn new(
        builtins: &'a dyn BuiltinNames,
        fs: &'a dyn FileSystem,
        config: &'a ResolverConfig,
    ) -> Self {
        Resolver {
            builtins,
            fs,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &'a ResolverConfig {
        self.config
    }

    /// The filesystem in use.
    pub fn file_system(&self) -> &'a dyn FileSystem {
        self.fs
    }

    /// Whether `request` names a builtin module (with or without prefix).
    pub fn is_builtin(&self, request: &str) -> bool {
        self.builtins.contains(strip_builtin_prefix(request))
    }

    /// Resolve `request` relative to `base_dir`.
    ///
    /// `base_dir` should be absolute; a relative one is taken against the
    /// working directory.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve(&self, request: &str, base_dir: &Path) -> Result<Resolved, ModuleNotFound> {
        if self.is_builtin(request) {
            tracing::debug!("builtin module");
            return Ok(Resolved::Builtin(request.to_owned()));
        }

        if request.is_empty() {
            return Err(ModuleNotFound::new(request));
        }

        let base_dir = absolutize(base_dir);

        if is_path_request(request) {
            let candidate = resolve_against(&base_dir, request);
            return self
                .resolve_file(&candidate)
                .or_else(|| self.resolve_directory(&candidate))
                .map(|path| {
                    tracing::debug!(path = %path.display(), "resolved path request");
                    Resolved::File(path)
                })
                .ok_or_else(|| ModuleNotFound::new(request));
        }

        self.resolve_installed(request, &base_dir)
            .map(|path| {
                tracing::debug!(path = %path.display(), "resolved installed package");
                Resolved::File(path)
            })
            .ok_or_else(|| ModuleNotFound::new(request))
    }

    /// Probe `candidate` and `candidate` + each configured suffix.
    pub fn resolve_file(&self, candidate: &Path) -> Option<PathBuf> {
        if self.probe(candidate) {
            return Some(candidate.to_path_buf());
        }
        self.config
            .extensions
            .iter()
            .map(|suffix| with_suffix(candidate, suffix))
            .find(|guess| self.probe(guess))
    }

    /// Resolve a directory to its entry file via manifest `main` or `index`.
    pub fn resolve_directory(&self, dir: &Path) -> Option<PathBuf> {
        let manifest_path = dir.join(&self.config.manifest_file);
        if self.fs.is_file(&manifest_path) {
            if let Some(main) = self.read_main(&manifest_path) {
                let main_path = join_below(dir, &main);
                return self
                    .resolve_file(&main_path)
                    .or_else(|| self.resolve_index(&main_path));
            }
        }
        self.resolve_index(dir)
    }

    fn resolve_index(&self, dir: &Path) -> Option<PathBuf> {
        self.resolve_file(&dir.join(&self.config.index_stem))
    }

    /// The manifest's string `main`, or `None` if absent, unreadable or malformed.
    fn read_main(&self, manifest_path: &Path) -> Option<String> {
        let text = match self.fs.read_to_string(manifest_path) {
            Ok(text) => text,
            Err(err) => {
                tracing::trace!(path = %manifest_path.display(), %err, "unreadable manifest");
                return None;
            }
        };
        match PackageManifest::parse(&text) {
            Ok(manifest) => manifest.main().map(str::to_owned),
            Err(err) => {
                tracing::trace!(path = %manifest_path.display(), %err, "malformed manifest");
                None
            }
        }
    }

    fn resolve_installed(&self, request: &str, base_dir: &Path) -> Option<PathBuf> {
        search_paths(base_dir, &self.config.modules_dir, self.config.search_order)
            .into_iter()
            .find_map(|dir| {
                let candidate = join_below(&dir, request);
                self.resolve_file(&candidate)
                    .or_else(|| self.resolve_directory(&candidate))
            })
    }

    fn probe(&self, path: &Path) -> bool {
        let found = self.fs.is_file(path);
        tracing::trace!(path = %path.display(), found, "probe");
        found
    }
}

#[cfg(test)]
mod tests;
