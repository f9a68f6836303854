//! Structured logging with tracing
//!
//! Initializes the tracing subscriber for the CLI. The level comes from the
//! project file's `[logging]` section; the `WIREBOX_LOG` environment
//! variable overrides it with a full `EnvFilter` directive.

use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;
use wirebox_domain::error::{Error, Result};

use crate::config::LoggingConfig;

/// Initialize logging with the provided configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env("WIREBOX_LOG").unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::configuration(format!("failed to initialize logging: {e}")))?;

    debug!("logging initialized with level {level}");
    Ok(())
}

/// Parse a log level string to a tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}
