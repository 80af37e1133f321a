//! Cluster health snapshot model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall cluster health colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
}

impl HealthStatus {
    /// Lower-case canonical rendering.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Green => "green",
            HealthStatus::Yellow => "yellow",
            HealthStatus::Red => "red",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time summary of cluster health as reported by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub cluster_name: String,
    pub status: HealthStatus,
    pub number_of_nodes: u32,
    pub number_of_data_nodes: u32,
    pub active_shards: u32,
    pub active_primary_shards: u32,
    pub relocating_shards: u32,
    pub initializing_shards: u32,
    pub unassigned_shards: u32,
    /// When the coordinator captured this snapshot.
    pub captured_at: DateTime<Utc>,
}

impl HealthSnapshot {
    /// Milliseconds since the Unix epoch at capture time.
    pub fn epoch_millis(&self) -> i64 {
        self.captured_at.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_renders_lowercase() {
        assert_eq!(HealthStatus::Green.to_string(), "green");
        assert_eq!(HealthStatus::Yellow.as_str(), "yellow");
        assert_eq!(
            serde_json::to_string(&HealthStatus::Red).unwrap(),
            "\"red\""
        );
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = HealthSnapshot {
            cluster_name: "logs".to_string(),
            status: HealthStatus::Yellow,
            number_of_nodes: 3,
            number_of_data_nodes: 2,
            active_shards: 10,
            active_primary_shards: 5,
            relocating_shards: 0,
            initializing_shards: 1,
            unassigned_shards: 0,
            captured_at: Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 30).unwrap(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "yellow");
        assert_eq!(json["cluster_name"], "logs");

        let back: HealthSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.epoch_millis(), 1_714_571_130_000);
    }
}
