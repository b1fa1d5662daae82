//! The `require` handle.

use std::io;
use std::path::{Path, PathBuf};

use cjs_load::{Loader, ScriptEngine};
use cjs_resolve::lexical::absolutize;
use cjs_resolve::{ModuleNotFound, Resolved};

use crate::ModuleSystem;

/// `require` bound to a location.
///
/// `require(id)` is [`call`](Require::call), `require.resolve(request)` is
/// [`resolve`](Require::resolve). Both work relative to
/// [`dirname`](Require::dirname).
pub struct Require<'s, E: ScriptEngine> {
    loader: Loader<'s, E>,
    dirname: PathBuf,
    filename: Option<PathBuf>,
}

impl<'s, E: ScriptEngine> Require<'s, E> {
    /// Bound to the file `filename`; `dirname` is its parent.
    pub fn for_file<'r>(system: &'s ModuleSystem<'r, E>, filename: &Path) -> Self {
        let filename = absolutize(filename);
        let dirname = filename
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| filename.clone());
        Require {
            loader: system.loader(),
            dirname,
            filename: Some(filename),
        }
    }

    /// Bound to the directory `dir`, with no file.
    pub fn in_dir<'r>(system: &'s ModuleSystem<'r, E>, dir: &Path) -> Self {
        Require {
            loader: system.loader(),
            dirname: absolutize(dir),
            filename: None,
        }
    }

    /// Bound to the process working directory.
    pub fn from_current_dir<'r>(system: &'s ModuleSystem<'r, E>) -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::in_dir(system, &cwd))
    }

    /// `require(id)`.
    pub fn call(&self, id: &str) -> Result<E::Value, E::Error> {
        self.loader.load(id, &self.dirname)
    }

    /// `require.resolve(request)`.
    pub fn resolve(&self, request: &str) -> Result<Resolved, ModuleNotFound> {
        self.loader.resolve(request, &self.dirname)
    }

    /// `__dirname`.
    pub fn dirname(&self) -> &Path {
        &self.dirname
    }

    /// `__filename`, when bound to a file.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }
}
