//! Tracing subscriber setup for binaries embedding the engine.
//!
//! The engine itself only emits `tracing` events; nothing is installed unless
//! the host calls [`init_tracing`].

use std::env;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub level: String,

    /// Whether to emit JSON formatted logs
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STACK_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `STACK_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            level: lookup("STACK_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.level),
            json: lookup("STACK_JSON_LOGS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.json),
        }
    }
}

/// Errors from subscriber setup.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive did not parse.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install a global fmt subscriber.
///
/// Fails if another subscriber is already installed; callers that may run
/// twice (tests) can ignore the error.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::Filter(e.to_string()))?;

    if config.json {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Install(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Install(e.to_string()))?;
    }

    tracing::info!(level = %config.level, json = config.json, "[stack] Tracing initialized");
    Ok(())
}
