//! Tracing setup.

use std::sync::Once;

/// Environment variable holding the log filter (`EnvFilter` syntax).
///
/// `RUST_LOG` is used when this one is unset.
pub const LOG_ENV: &str = "CJS_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `CJS_LOG=cjs_resolve=trace` or `RUST_LOG=cjs_load=debug`;
/// with neither set, nothing is installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = if let Ok(directives) = std::env::var(LOG_ENV) {
            EnvFilter::new(directives)
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let installed = tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(filter)
            .try_init();

        // Reported through whatever subscriber the embedder already installed.
        if let Err(err) = installed {
            tracing::debug!(%err, "keeping existing tracing subscriber");
        }
    });
}
