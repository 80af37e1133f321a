//! Configuration types for the administrative pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_DESTRUCTIVE_TIMEOUT_SECS, DEFAULT_MASTER_NODE_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS,
};

/// Default timeouts, keyed by the class of operation.
///
/// Destructive operations wait for acknowledgement from the cluster and get a
/// longer budget than read operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutDefaults {
    /// Timeout for destructive operations such as index deletion.
    #[serde(with = "duration_secs")]
    pub destructive: Duration,
    /// Timeout for read operations such as cluster health.
    #[serde(with = "duration_secs")]
    pub read: Duration,
}

impl TimeoutDefaults {
    /// Pick the timeout for an operation class.
    pub fn for_operation(&self, destructive: bool) -> Duration {
        if destructive {
            self.destructive
        } else {
            self.read
        }
    }
}

impl Default for TimeoutDefaults {
    fn default() -> Self {
        Self {
            destructive: Duration::from_secs(DEFAULT_DESTRUCTIVE_TIMEOUT_SECS),
            read: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
        }
    }
}

/// Resolved administrative configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Per-operation-class request timeouts.
    pub timeouts: TimeoutDefaults,
    /// Time allowed to reach the coordinating node.
    #[serde(with = "duration_secs")]
    pub master_node_timeout: Duration,
    /// When set, destructive operations must name their targets explicitly
    /// (no empty selector, `_all`, or wildcard patterns).
    pub destructive_requires_name: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            timeouts: TimeoutDefaults::default(),
            master_node_timeout: Duration::from_secs(DEFAULT_MASTER_NODE_TIMEOUT_SECS),
            destructive_requires_name: false,
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_differ_per_operation_class() {
        let defaults = TimeoutDefaults::default();
        assert_eq!(defaults.for_operation(true), Duration::from_secs(60));
        assert_eq!(defaults.for_operation(false), Duration::from_secs(10));
    }

    #[test]
    fn test_admin_config_default() {
        let config = AdminConfig::default();
        assert_eq!(config.master_node_timeout, Duration::from_secs(30));
        assert!(!config.destructive_requires_name);
    }
}
