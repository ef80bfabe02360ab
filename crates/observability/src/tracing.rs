//! Tracing/logging initialization.
//!
//! Authorization decisions are logged as structured events (denials at warn,
//! storage failures at error), so the default output is JSON for ingestion.

use tracing_subscriber::EnvFilter;

/// Default directives when `RUST_LOG` is unset.
///
/// Per-decision grant/deny events in the engine sit at debug and stay off by
/// default; guard denials (warn) and fail-closed storage errors still pass
/// the info floor.
const DEFAULT_DIRECTIVES: &str = "info,tillworks_authz=info,tillworks_infra=info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
