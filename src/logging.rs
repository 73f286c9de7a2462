//! Diagnostic logging on stderr.
//!
//! Reports meant for the user go to stdout through `cli::report`; this
//! subscriber only carries `tracing` events such as skipped files and
//! per-catalog updates. The filter comes from `LOCSYNC_LOG` when set,
//! otherwise `warn` (or `info` with `-v`).

use std::io::{self, IsTerminal};

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding `EnvFilter` directives.
pub const LOG_ENV: &str = "LOCSYNC_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid LOCSYNC_LOG filter: {0}")]
    Filter(String),
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

pub fn default_directives(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}

/// Builds the filter from `directives` (the value of `LOCSYNC_LOG`), or from
/// the default level when unset.
pub fn build_filter(directives: Option<&str>, verbose: bool) -> Result<EnvFilter, LoggingError> {
    match directives {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .map_err(|error| LoggingError::Filter(error.to_string())),
        _ => Ok(EnvFilter::new(default_directives(verbose))),
    }
}

/// Installs the global subscriber. Call once, before any command runs.
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    let directives = std::env::var(LOG_ENV).ok();
    let filter = build_filter(directives.as_deref(), verbose)?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
