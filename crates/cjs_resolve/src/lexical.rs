//! Lexical path arithmetic.
//!
//! Resolution works on path *strings*: `.` and `..` are folded without
//! touching the filesystem and symlinks are never followed.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Whether a request names a filesystem path rather than a package.
#[inline]
pub fn is_path_request(request: &str) -> bool {
    request.starts_with("../") || request.starts_with("./") || request.starts_with('/')
}

/// Fold `.` and `..` components. `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

/// Resolve `request` against `base` the way a shell would: an absolute
/// request replaces the base entirely.
pub fn resolve_against(base: &Path, request: &str) -> PathBuf {
    normalize(&base.join(request))
}

/// Append `rel` below `base`, treating a leading `/` in `rel` as relative.
pub fn join_below(base: &Path, rel: &str) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in Path::new(rel).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other.as_os_str()),
        }
    }
    normalize(&joined)
}

/// `path` with `suffix` appended to its final segment (`a/b` + `.js` → `a/b.js`).
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Make `dir` absolute (against the working directory) and normalized.
pub fn absolutize(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return normalize(dir);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(dir)),
        Err(_) => normalize(dir),
    }
}
