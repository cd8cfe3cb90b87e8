//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Translate `LOGLEVEL` values into an `EnvFilter` directive
//!
//! # Design Decisions
//! - Diagnostic logs go to stderr; stdout carries operator notices only
//! - `RUST_LOG` wins over `LOGLEVEL` when both are set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `LOGLEVEL` value to a tracing level name.
///
/// Accepts tracing names and the conventional `WARNING`/`CRITICAL`/`FATAL`
/// spellings, case-insensitively. Unknown values fall back to `info`.
pub fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        "off" | "none" => "off",
        _ => "info",
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(normalize_level(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
