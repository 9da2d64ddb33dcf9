//! Structured logging with tracing
//!
//! The `STRATA_LOG` environment variable takes precedence over the level
//! passed on the command line. Logs go to stderr so reports on stdout stay
//! machine readable.

use crate::{Result, ValidationError};
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "STRATA_LOG";

/// Initialize logging at `level`, as text or JSON lines
pub fn init_logging(level: &str, json_format: bool) -> Result<()> {
    let level = parse_log_level(level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let registry = Registry::default().with(filter);

    // Layer types differ so each format needs its own branch
    let result = if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    };
    result.map_err(|e| ValidationError::Logging(e.to_string()))?;

    tracing::debug!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ValidationError::Logging(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}
