//! Tracing subscriber setup for hosts embedding the task service.

use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_VAR: &str = "TASKBOARD_LOG";
/// Environment variable selecting `compact` (default) or `json` output.
pub const LOG_FORMAT_VAR: &str = "TASKBOARD_LOG_FORMAT";

const DEFAULT_FILTER: &str = "taskboard=info,warn";

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match env::var(LOG_FORMAT_VAR).as_deref() {
        Ok("json") => registry.with(fmt::layer().json().with_ansi(false)).try_init(),
        _ => registry.with(fmt::layer().compact()).try_init(),
    }
}
