use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Install a compact stdout subscriber.
///
/// Respects `RUST_LOG`; falls back to `info,tower_http=debug` so each
/// request shows up while the server runs in a terminal.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}
