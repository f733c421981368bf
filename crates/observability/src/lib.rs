//! Process-wide tracing/logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize logging for the process. Filter via `RUST_LOG` (default
/// `info`); set `DAWA_LOG_JSON=1` for JSON lines instead of plain text.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("DAWA_LOG_JSON").is_ok_and(|v| v == "1");
    if json {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(false)
            .try_init();
    } else {
        // Plain text suits the interactive POS loop.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    }
}
