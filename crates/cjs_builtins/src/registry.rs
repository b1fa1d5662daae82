//! Immutable name → value map of builtin modules.

use std::fmt;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::names::{strip_builtin_prefix, BuiltinNames, BUILTIN_PREFIX};
use crate::RegistryError;

/// A single registered builtin module.
#[derive(Clone, Debug)]
pub struct BuiltinEntry<V> {
    name: String,
    aliased_name: String,
    value: V,
}

impl<V> BuiltinEntry<V> {
    /// Canonical, unprefixed name (`fs`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefixed alias (`node:fs`).
    pub fn aliased_name(&self) -> &str {
        &self.aliased_name
    }

    /// The pre-loaded export value.
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// Registry of pre-loaded builtin modules.
///
/// Each module is stored once; both its bare name and its `node:` alias
/// index the same entry, so every lookup hands out the same `&V`.
#[derive(Clone, Debug)]
pub struct BuiltinRegistry<V> {
    entries: Vec<BuiltinEntry<V>>,
    /// Bare and aliased names, both pointing into `entries`.
    index: FxHashMap<String, usize>,
}

impl<V> BuiltinRegistry<V> {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltinRegistry {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Build a registry from already-loaded `(name, value)` pairs.
    ///
    /// Names may be given with or without the `node:` prefix. When a name
    /// repeats, the first value wins.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (name, value) in entries {
            let name = name.into();
            registry.insert(strip_builtin_prefix(&name).to_owned(), value);
        }
        registry
    }

    /// Load every named module concurrently and register the results.
    ///
    /// Each name is loaded exactly once on the rayon pool. The call returns
    /// only after every load has finished; if any load fails, no registry is
    /// produced and the failure is reported.
    pub fn initialize<N, F, E>(names: &[N], load: F) -> Result<Self, RegistryError>
    where
        N: AsRef<str> + Sync,
        F: Fn(&str) -> Result<V, E> + Sync + Send,
        E: fmt::Display,
        V: Send,
    {
        let loaded = names
            .par_iter()
            .map(|name| {
                let name = name.as_ref();
                load(name)
                    .map(|value| (name.to_owned(), value))
                    .map_err(|err| RegistryError::Load {
                        name: name.to_owned(),
                        message: err.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = loaded.len(), "builtin modules loaded");
        Ok(Self::from_entries(loaded))
    }

    fn insert(&mut self, name: String, value: V) {
        if self.index.contains_key(&name) {
            tracing::warn!(name = %name, "duplicate builtin module ignored");
            return;
        }

        let aliased_name = format!("{BUILTIN_PREFIX}{name}");
        let slot = self.entries.len();
        self.index.insert(name.clone(), slot);
        self.index.insert(aliased_name.clone(), slot);
        self.entries.push(BuiltinEntry {
            name,
            aliased_name,
            value,
        });
    }

    /// Whether `name` (bare or prefixed) is registered.
    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a module's value by bare or prefixed name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entry(name).map(BuiltinEntry::value)
    }

    /// Look up a module's full entry by bare or prefixed name.
    pub fn entry(&self, name: &str) -> Option<&BuiltinEntry<V>> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(BuiltinEntry::name)
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BuiltinEntry<V>> {
        self.entries.iter()
    }

    /// Number of registered modules (aliases are not counted twice).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for BuiltinRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Send + Sync> BuiltinNames for BuiltinRegistry<V> {
    fn contains(&self, name: &str) -> bool {
        self.has(name)
    }
}
