//! Response models for administrative operations.
//!
//! Types are organized by resource in submodules and re-exported here.

pub mod health;
pub mod indices;

pub use health::{HealthSnapshot, HealthStatus};
pub use indices::DeleteIndexResponse;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::error::DispatchErrorKind;

/// Success payload of a dispatched request, tagged by operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "response", rename_all = "snake_case")]
pub enum AdminResponse {
    Acknowledged(DeleteIndexResponse),
    Health(HealthSnapshot),
}

impl AdminResponse {
    fn variant_name(&self) -> &'static str {
        match self {
            AdminResponse::Acknowledged(_) => "acknowledged",
            AdminResponse::Health(_) => "health",
        }
    }

    fn unexpected(&self, expected: &str) -> DispatchError {
        DispatchError::new(
            DispatchErrorKind::UnexpectedResponse,
            format!(
                "expected a [{}] response but the coordinator returned [{}]",
                expected,
                self.variant_name()
            ),
        )
    }

    /// Convert into a deletion acknowledgement.
    pub fn into_acknowledged(self) -> Result<DeleteIndexResponse, DispatchError> {
        match self {
            AdminResponse::Acknowledged(response) => Ok(response),
            other => Err(other.unexpected("acknowledged")),
        }
    }

    /// Convert into a health snapshot.
    pub fn into_health(self) -> Result<HealthSnapshot, DispatchError> {
        match self {
            AdminResponse::Health(snapshot) => Ok(snapshot),
            other => Err(other.unexpected("health")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_acknowledged_mismatch() {
        let response = AdminResponse::Acknowledged(DeleteIndexResponse::acknowledged(vec![
            "logs".to_string(),
        ]));
        let err = response.clone().into_health().unwrap_err();
        assert_eq!(err.kind(), DispatchErrorKind::UnexpectedResponse);
        assert!(err.reason().contains("[health]"));

        let ack = response.into_acknowledged().unwrap();
        assert!(ack.acknowledged);
        assert_eq!(ack.indices, vec!["logs".to_string()]);
    }
}
