//! Logging setup for library consumers.
//!
//! The core logs through `tracing` macros everywhere; this module only
//! installs a subscriber for binaries or supervisors that want one.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize a global tracing subscriber.
///
/// Respects `RUST_LOG`, falling back to the provided default directive
/// (e.g. "info"). Call once at startup; later calls are ignored by the
/// subscriber registry.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();
}
