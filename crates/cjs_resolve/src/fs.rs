//! Filesystem access used by resolution and loading.
//!
//! Resolution only ever asks two questions: "is this a regular file?" and
//! "what does it contain?". Everything goes through [`FileSystem`] so the
//! same algorithm runs against the real disk or an in-memory tree.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::lexical::normalize;

/// Read-only filesystem capability.
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists and is a regular file (symlinks followed).
    fn is_file(&self, path: &Path) -> bool;

    /// Read the whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The host operating system's filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|meta| meta.is_file())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory file tree.
///
/// Directories exist implicitly: only inserted paths are files. Every
/// `is_file` and `read_to_string` call is counted, which lets callers assert
/// that an operation performed no filesystem access at all.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<FxHashMap<PathBuf, String>>,
    accesses: AtomicUsize,
}

impl MemoryFileSystem {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `(path, contents)` pairs.
    pub fn with_files<I, P, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: AsRef<Path>,
        S: Into<String>,
    {
        let fs = Self::new();
        for (path, contents) in files {
            fs.insert(path, contents);
        }
        fs
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
        self.files
            .write()
            .insert(normalize(path.as_ref()), contents.into());
    }

    /// Remove a file, returning its contents.
    pub fn remove(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.write().remove(&normalize(path.as_ref()))
    }

    /// Number of `is_file`/`read_to_string` calls so far.
    pub fn access_count(&self) -> usize {
        self.accesses.load(Ordering::Relaxed)
    }

    /// Reset the access counter to zero.
    pub fn reset_access_count(&self) {
        self.accesses.store(0, Ordering::Relaxed);
    }

    fn touch(&self) {
        self.accesses.fetch_add(1, Ordering::Relaxed);
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.touch();
        self.files.read().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.touch();
        self.files.read().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}
