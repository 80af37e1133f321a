//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return `ConfigError::InvalidValue`.

use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_DESTRUCTIVE_REQUIRES_NAME, ENV_DESTRUCTIVE_TIMEOUT, ENV_MASTER_TIMEOUT, ENV_READ_TIMEOUT,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_secs(var: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be a whole number of seconds".to_string(),
        })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(value) = env_var_or_none(ENV_DESTRUCTIVE_TIMEOUT) {
        loader.set_destructive_timeout(Some(parse_secs(ENV_DESTRUCTIVE_TIMEOUT, &value)?));
    }
    if let Some(value) = env_var_or_none(ENV_READ_TIMEOUT) {
        loader.set_read_timeout(Some(parse_secs(ENV_READ_TIMEOUT, &value)?));
    }
    if let Some(value) = env_var_or_none(ENV_MASTER_TIMEOUT) {
        loader.set_master_node_timeout(Some(parse_secs(ENV_MASTER_TIMEOUT, &value)?));
    }
    if let Some(value) = env_var_or_none(ENV_DESTRUCTIVE_REQUIRES_NAME) {
        loader.set_destructive_requires_name(Some(value.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: ENV_DESTRUCTIVE_REQUIRES_NAME.to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }
    Ok(())
}
