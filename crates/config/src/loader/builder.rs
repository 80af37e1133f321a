//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` layering defaults, `.env`,
//!   environment variables and explicit overrides.
//! - Validate timeout bounds when building the final `AdminConfig`.
//!
//! Invariants / Assumptions:
//! - Builder methods called after `from_env()` take precedence over environment variables.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::MAX_TIMEOUT_SECS;
use crate::types::{AdminConfig, TimeoutDefaults};

/// Configuration loader that builds an [`AdminConfig`] from layered sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    destructive_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    master_node_timeout: Option<Duration>,
    destructive_requires_name: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not
    /// loaded. Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DotenvParse` for invalid syntax and
    /// `ConfigError::DotenvIo` when the file exists but cannot be read.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the destructive operation timeout.
    pub fn with_destructive_timeout(mut self, timeout: Duration) -> Self {
        self.destructive_timeout = Some(timeout);
        self
    }

    /// Set the read operation timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the coordinating-node timeout.
    pub fn with_master_node_timeout(mut self, timeout: Duration) -> Self {
        self.master_node_timeout = Some(timeout);
        self
    }

    /// Require explicit targets for destructive operations.
    pub fn with_destructive_requires_name(mut self, required: bool) -> Self {
        self.destructive_requires_name = Some(required);
        self
    }

    pub(crate) fn set_destructive_timeout(&mut self, timeout: Option<Duration>) {
        self.destructive_timeout = timeout;
    }

    pub(crate) fn set_read_timeout(&mut self, timeout: Option<Duration>) {
        self.read_timeout = timeout;
    }

    pub(crate) fn set_master_node_timeout(&mut self, timeout: Option<Duration>) {
        self.master_node_timeout = timeout;
    }

    pub(crate) fn set_destructive_requires_name(&mut self, required: Option<bool>) {
        self.destructive_requires_name = required;
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` if any timeout is zero or exceeds
    /// [`MAX_TIMEOUT_SECS`].
    pub fn build(self) -> Result<AdminConfig, ConfigError> {
        let defaults = AdminConfig::default();

        let config = AdminConfig {
            timeouts: TimeoutDefaults {
                destructive: self
                    .destructive_timeout
                    .unwrap_or(defaults.timeouts.destructive),
                read: self.read_timeout.unwrap_or(defaults.timeouts.read),
            },
            master_node_timeout: self
                .master_node_timeout
                .unwrap_or(defaults.master_node_timeout),
            destructive_requires_name: self
                .destructive_requires_name
                .unwrap_or(defaults.destructive_requires_name),
        };

        Self::validate_timeout("destructive timeout", config.timeouts.destructive)?;
        Self::validate_timeout("read timeout", config.timeouts.read)?;
        Self::validate_timeout("master node timeout", config.master_node_timeout)?;

        Ok(config)
    }

    fn validate_timeout(name: &str, timeout: Duration) -> Result<(), ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: format!("{} must be greater than 0 seconds", name),
            });
        }

        if timeout.as_secs() > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "{} exceeds maximum allowed value of {} seconds",
                    name, MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }
}
