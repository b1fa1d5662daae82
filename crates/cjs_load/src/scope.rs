//! What a module sees while it executes.
//!
//! Each execution gets its own [`ExecutionScope`]: a fresh exports slot, the
//! module's own `__filename` and `__dirname`, and a `require` bound to that
//! directory. Host globals are shared by reference.

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cjs_resolve::Resolved;
use rustc_hash::FxHashMap;

use crate::{LoadError, Loader, ScriptEngine};

/// Names of the ambient globals a host is expected to provide.
pub const AMBIENT_GLOBALS: [&str; 7] = [
    "clearInterval",
    "clearTimeout",
    "console",
    "global",
    "process",
    "setInterval",
    "setTimeout",
];

/// The single storage location behind both `exports` and `module.exports`.
///
/// Cloning the slot clones the handle, not the value: every clone reads and
/// writes the same location.
#[repr(transparent)]
pub struct ExportsSlot<V>(Rc<RefCell<V>>);

impl<V> ExportsSlot<V> {
    #[inline]
    pub fn new(value: V) -> Self {
        ExportsSlot(Rc::new(RefCell::new(value)))
    }

    /// Replace the exported value.
    #[inline]
    pub fn set(&self, value: V) {
        *self.0.borrow_mut() = value;
    }

    /// Replace the exported value, returning the previous one.
    #[inline]
    pub fn replace(&self, value: V) -> V {
        self.0.replace(value)
    }

    /// Mutate the exported value in place.
    ///
    /// `f` must not touch this slot again; the slot is borrowed while it runs.
    #[inline]
    pub fn update<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Returns `true` if both handles point to the same slot.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<V: Clone> ExportsSlot<V> {
    /// The current exported value.
    #[inline]
    pub fn get(&self) -> V {
        self.0.borrow().clone()
    }
}

impl<V> Clone for ExportsSlot<V> {
    #[inline]
    fn clone(&self) -> Self {
        ExportsSlot(Rc::clone(&self.0))
    }
}

impl<V: fmt::Debug> fmt::Debug for ExportsSlot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExportsSlot").field(&self.0.borrow()).finish()
    }
}

/// The `module` object: `module.exports` is the same slot as `exports`.
#[derive(Debug)]
pub struct ModuleObject<V> {
    filename: PathBuf,
    exports: ExportsSlot<V>,
}

impl<V> ModuleObject<V> {
    pub fn exports(&self) -> &ExportsSlot<V> {
        &self.exports
    }

    /// `module.filename`.
    pub fn filename(&self) -> &Path {
        &self.filename
    }
}

/// Host-provided globals exposed to every module (timers, console, process...).
#[derive(Clone, Debug)]
pub struct HostBindings<V> {
    bindings: FxHashMap<String, V>,
}

impl<V> HostBindings<V> {
    pub fn new() -> Self {
        HostBindings {
            bindings: FxHashMap::default(),
        }
    }

    /// Add or replace a binding.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.bindings.insert(name.into(), value)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Entries of [`AMBIENT_GLOBALS`] with no binding.
    pub fn missing_ambient(&self) -> impl Iterator<Item = &'static str> + '_ {
        AMBIENT_GLOBALS
            .into_iter()
            .filter(|name| !self.contains(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<V> Default for HostBindings<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S: Into<String>> FromIterator<(S, V)> for HostBindings<V> {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        HostBindings {
            bindings: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}

/// Files currently executing, innermost first, linked through the stack.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lineage<'p> {
    pub(crate) path: &'p Path,
    pub(crate) parent: Option<&'p Lineage<'p>>,
}

impl Lineage<'_> {
    pub(crate) fn contains(&self, path: &Path) -> bool {
        let mut node = Some(self);
        while let Some(current) = node {
            if current.path == path {
                return true;
            }
            node = current.parent;
        }
        false
    }

    /// Outermost first.
    pub(crate) fn to_chain(&self) -> Vec<PathBuf> {
        let mut chain = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            chain.push(current.path.to_path_buf());
            node = current.parent;
        }
        chain.reverse();
        chain
    }
}

/// Bindings for one execution of one module file.
pub struct ExecutionScope<'l, E: ScriptEngine> {
    loader: Loader<'l, E>,
    dirname: PathBuf,
    module: ModuleObject<E::Value>,
    parent: Option<&'l Lineage<'l>>,
}

impl<'l, E: ScriptEngine> ExecutionScope<'l, E> {
    pub(crate) fn new(
        loader: Loader<'l, E>,
        filename: PathBuf,
        parent: Option<&'l Lineage<'l>>,
        exports: E::Value,
    ) -> Self {
        let dirname = filename
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| filename.clone());
        ExecutionScope {
            loader,
            dirname,
            module: ModuleObject {
                filename,
                exports: ExportsSlot::new(exports),
            },
            parent,
        }
    }

    /// `__filename`: the absolute path of the executing file.
    pub fn filename(&self) -> &Path {
        &self.module.filename
    }

    /// `__dirname`: the directory containing [`filename`](Self::filename).
    pub fn dirname(&self) -> &Path {
        &self.dirname
    }

    /// `exports`.
    pub fn exports(&self) -> &ExportsSlot<E::Value> {
        &self.module.exports
    }

    /// `module`.
    pub fn module(&self) -> &ModuleObject<E::Value> {
        &self.module
    }

    /// A host global, e.g. `console`.
    pub fn host(&self, name: &str) -> Option<&E::Value> {
        self.loader.host_bindings().get(name)
    }

    pub fn host_bindings(&self) -> &HostBindings<E::Value> {
        self.loader.host_bindings()
    }

    /// `require(request)`, relative to [`dirname`](Self::dirname).
    pub fn require(&self, request: &str) -> Result<E::Value, E::Error> {
        let here = Lineage {
            path: self.filename(),
            parent: self.parent,
        };
        self.loader.load_within(request, &self.dirname, Some(&here))
    }

    /// `require.resolve(request)`, relative to [`dirname`](Self::dirname).
    pub fn resolve(&self, request: &str) -> Result<Resolved, E::Error> {
        self.loader
            .resolve(request, &self.dirname)
            .map_err(|err| LoadError::from(err).into())
    }

    /// Files whose execution is waiting on this one, outermost first,
    /// ending with this file.
    pub fn require_stack(&self) -> Vec<PathBuf> {
        Lineage {
            path: self.filename(),
            parent: self.parent,
        }
        .to_chain()
    }

    pub(crate) fn into_exports(self) -> E::Value {
        self.module.exports.get()
    }
}
