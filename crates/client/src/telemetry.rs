//! Logging initialization.
//!
//! Sets up a `tracing-subscriber` registry with an `EnvFilter` and either the
//! human-readable or the JSON formatter.
//!
//! # Usage
//!
//! ```rust,ignore
//! use admin_client::telemetry::TelemetryConfig;
//!
//! TelemetryConfig::from_env().init()?;
//! ```

use admin_config::env_var_or_none;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the filter directive (e.g. `admin_client=debug`).
pub const ENV_LOG: &str = "ADMIN_LOG";

/// Environment variable selecting the output format (`json` or `text`).
pub const ENV_LOG_FORMAT: &str = "ADMIN_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Text,
        }
    }
}

impl TelemetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `ADMIN_LOG` and `ADMIN_LOG_FORMAT`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(filter) = env_var_or_none(ENV_LOG) {
            config.filter = filter;
        }
        if let Some(format) = env_var_or_none(ENV_LOG_FORMAT) {
            config.format = if format.eq_ignore_ascii_case("json") {
                LogFormat::Json
            } else {
                LogFormat::Text
            };
        }
        config
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    /// Returns an error if the filter directive is invalid or a global
    /// subscriber is already set.
    pub fn init(&self) -> Result<(), TelemetryError> {
        let env_filter = EnvFilter::try_new(&self.filter)
            .map_err(|e| TelemetryError::InvalidFilter(self.filter.clone(), e.to_string()))?;

        let registry = tracing_subscriber::registry().with(env_filter);
        let result = match self.format {
            LogFormat::Text => registry.with(fmt::layer()).try_init(),
            LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        };
        result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{0}': {1}")]
    InvalidFilter(String, String),

    #[error("Failed to install global subscriber: {0}")]
    AlreadyInitialized(String),
}
