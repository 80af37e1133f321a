//! Index management response models.

use serde::{Deserialize, Serialize};

/// Outcome of an index deletion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteIndexResponse {
    /// Whether the cluster acknowledged the deletion within the timeout.
    pub acknowledged: bool,
    /// Concrete indices removed, in resolution order.
    #[serde(default)]
    pub indices: Vec<String>,
}

impl DeleteIndexResponse {
    pub fn acknowledged(indices: Vec<String>) -> Self {
        Self {
            acknowledged: true,
            indices,
        }
    }
}
