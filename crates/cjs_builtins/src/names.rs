//! Builtin module names and the name-only lookup view.

use rustc_hash::FxHashSet;

/// Prefix that marks an explicit request for a builtin module (`node:fs`).
pub const BUILTIN_PREFIX: &str = "node:";

/// Canonical names of the modules a Node-compatible host provides.
///
/// This is the list a startup routine iterates when populating the registry.
pub const NODE_BUILTIN_MODULES: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Strip one leading [`BUILTIN_PREFIX`] from a request.
///
/// `"node:fs"` becomes `"fs"`; anything else is returned unchanged.
#[inline]
pub fn strip_builtin_prefix(request: &str) -> &str {
    request.strip_prefix(BUILTIN_PREFIX).unwrap_or(request)
}

/// Name-only view of a builtin registry.
///
/// Implementations must recognize both the bare name and its prefixed alias.
pub trait BuiltinNames: Send + Sync {
    /// Whether `name` (bare or `node:`-prefixed) names a builtin module.
    fn contains(&self, name: &str) -> bool;
}

/// A plain set of builtin names with no values attached.
#[derive(Clone, Debug, Default)]
pub struct NameList {
    names: FxHashSet<String>,
}

impl NameList {
    /// Create a name list from canonical (unprefixed) names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameList {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The names of every module a Node-compatible host provides.
    pub fn node() -> Self {
        Self::new(NODE_BUILTIN_MODULES.iter().copied())
    }

    /// Number of canonical names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the list has no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl BuiltinNames for NameList {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(strip_builtin_prefix(name))
    }
}
