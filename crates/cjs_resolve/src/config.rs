//! Resolver configuration.

use crate::SearchOrder;

/// Environment variable that selects the [`SearchOrder`] (`nearest` or `root`).
pub const SEARCH_ORDER_ENV: &str = "CJS_SEARCH_ORDER";

/// Knobs of the resolution algorithm.
///
/// `Default` reproduces the conventional layout: probe `.js`, `.json`,
/// `.node`; fall back to `index`; read `package.json`; search
/// `node_modules` nearest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Suffixes tried, in order, after the exact candidate.
    pub extensions: Vec<String>,
    /// File stem used when a directory has no usable `main`.
    pub index_stem: String,
    /// Name of the package manifest inside a directory.
    pub manifest_file: String,
    /// Name of the installed-package directory searched in ancestors.
    pub modules_dir: String,
    /// Priority between nearer and farther ancestors.
    pub search_order: SearchOrder,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            extensions: vec![".js".into(), ".json".into(), ".node".into()],
            index_stem: "index".into(),
            manifest_file: "package.json".into(),
            modules_dir: "node_modules".into(),
            search_order: SearchOrder::NearestFirst,
        }
    }
}

impl ResolverConfig {
    /// Defaults, with [`SEARCH_ORDER_ENV`] applied when set.
    ///
    /// An unrecognized value is logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(SEARCH_ORDER_ENV) {
            match raw.parse() {
                Ok(order) => config.search_order = order,
                Err(err) => tracing::warn!(%err, "ignoring {SEARCH_ORDER_ENV}"),
            }
        }
        config
    }

    /// Replace the probed suffixes.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ancestor search order.
    #[must_use]
    pub fn with_search_order(mut self, order: SearchOrder) -> Self {
        self.search_order = order;
        self
    }
}
