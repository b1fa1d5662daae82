//! Installed-package search directories.
//!
//! For `base_dir = /project/src` the candidates are, nearest first:
//!
//! ```text
//! /project/src/node_modules
//! /project/node_modules
//! /node_modules
//! ```
//!
//! A prefix whose last segment is already `node_modules` is skipped, so a
//! package never searches `node_modules/node_modules`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Priority between nearer and farther ancestor directories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchOrder {
    /// `base_dir/node_modules` first, the filesystem root last.
    #[default]
    NearestFirst,
    /// The filesystem root first, `base_dir/node_modules` last.
    ///
    /// The candidates are exactly those of `NearestFirst`, reversed; only
    /// the ordering changes.
    RootFirst,
}

impl SearchOrder {
    /// The configuration spelling (`nearest` or `root`).
    pub fn as_str(self) -> &'static str {
        match self {
            SearchOrder::NearestFirst => "nearest",
            SearchOrder::RootFirst => "root",
        }
    }
}

impl fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognized [`SearchOrder`] spelling.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown search order '{0}' (expected 'nearest' or 'root')")]
pub struct ParseSearchOrderError(String);

impl FromStr for SearchOrder {
    type Err = ParseSearchOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "nearest-first" => Ok(SearchOrder::NearestFirst),
            "root" | "root-first" => Ok(SearchOrder::RootFirst),
            _ => Err(ParseSearchOrderError(s.to_owned())),
        }
    }
}

/// Enumerate `<ancestor>/<modules_dir>` for every ancestor of `base_dir`.
///
/// `base_dir` is expected to be absolute and normalized.
pub fn search_paths(base_dir: &Path, modules_dir: &str, order: SearchOrder) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = base_dir
        .ancestors()
        .filter(|ancestor| ancestor.file_name().map_or(true, |name| name != modules_dir))
        .map(|ancestor| ancestor.join(modules_dir))
        .collect();

    if order == SearchOrder::RootFirst {
        paths.reverse();
    }
    paths
}
