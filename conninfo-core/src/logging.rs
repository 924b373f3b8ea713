//! Logging setup for conninfo.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the application. With the `tracing-subscriber` feature enabled, [`init`]
//! installs one driven by environment variables.
//!
//! # Environment Variables
//!
//! - `CONNINFO_DEBUG=true|1|yes` - Enable debug logging
//! - `CONNINFO_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `CONNINFO_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! Option values never appear in log events, only option names and lengths,
//! so passwords are safe at every level.
//!
//! # Usage
//!
//! ```rust,no_run
//! use conninfo_core::logging;
//!
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "CONNINFO_DEBUG";
const LEVEL_VAR: &str = "CONNINFO_LOG_LEVEL";
const FORMAT_VAR: &str = "CONNINFO_LOG_FORMAT";

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn level_from(level: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match level.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn format_from(format: Option<&str>) -> &'static str {
    match format.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Check if debug logging is enabled via `CONNINFO_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR).is_ok_and(|v| is_truthy(&v))
}

/// Get the configured log level.
///
/// Defaults to "debug" if `CONNINFO_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    level_from(env::var(LEVEL_VAR).ok().as_deref(), is_debug_enabled())
}

/// Get the configured log format. Defaults to "json".
pub fn get_log_format() -> &'static str {
    format_from(env::var(FORMAT_VAR).ok().as_deref())
}

/// Initialize logging from the environment.
///
/// Does nothing unless `CONNINFO_DEBUG` or `CONNINFO_LOG_LEVEL` is set.
/// Subsequent calls are no-ops.
pub fn init() {
    if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
        return;
    }
    init_with_level(get_log_level());
}

/// Initialize logging at a specific level, ignoring `CONNINFO_LOG_LEVEL`.
pub fn init_with_level(level: &str) {
    #[cfg(not(feature = "tracing-subscriber"))]
    let _ = level;

    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = level_from(Some(level), false);
            let filter = EnvFilter::try_new(format!(
                "conninfo={},conninfo_core={},conninfo_service={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let format = get_log_format();
            let registry = tracing_subscriber::registry().with(filter);
            let installed = match format {
                "json" => registry.with(fmt::layer().json()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level, format, "conninfo logging initialized");
            }
        }
    });
}
