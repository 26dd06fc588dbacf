//! Default log filters for the two entry points.
//!
//! `RUST_LOG` always wins; these apply only when it is unset or invalid.

use tracing_subscriber::EnvFilter;

/// One-shot CLI runs: app progress, and only problems from the core.
pub const CLI_FILTER: &str = "huebrush=info,scribble_colorize=warn";

/// Server: per-request traces and per-stage diagnostics from the core.
pub const SERVER_FILTER: &str = "huebrush=debug,scribble_colorize=debug,tower_http=debug";

/// Filter from `RUST_LOG`, falling back to `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
