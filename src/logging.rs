//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence. Otherwise the `-v` count picks the level:
//! - 0: warn
//! - 1: info (sources loaded, records skipped)
//! - 2: debug (scheduler summaries)
//! - 3+: trace

use tracing_subscriber::EnvFilter;

pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber writing to stderr. Safe to call more than
/// once; later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
