use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging to stderr, filtered by `RUST_LOG` (default `info`).
///
/// Stdout is left to command output so prompts can be piped.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
