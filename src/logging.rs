//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the default log filter.
pub const ENV_LOG: &str = "CHIRP_LOG";

/// Installs the global tracing subscriber. An explicit `level` (from the
/// root `--log-level` flag) wins over the `CHIRP_LOG` environment variable.
/// Safe to call more than once; later calls are no-ops.
pub fn init(level: &str) {
    let filter = if level.is_empty() {
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::new(level)
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
