//! Cluster coordination seam.
//!
//! Responsibilities:
//! - Define the operations the dispatcher needs from the cluster.
//!
//! Does NOT handle:
//! - Transport, cluster state computation or shard allocation. Those belong
//!   to implementations.
//!
//! Invariants:
//! - Implementations surface timeouts and unavailability as [`DispatchError`]
//!   values, never as panics.

use async_trait::async_trait;

use crate::error::DispatchError;
use crate::models::{AdminResponse, DeleteIndexResponse, HealthSnapshot};
use crate::request::{AdminRequest, OperationKind};

/// The cluster-coordination collaborator.
#[async_trait]
pub trait ClusterCoordinator: Send + Sync {
    /// Delete the indices `request` resolves to.
    async fn delete_index(&self, request: &AdminRequest)
    -> Result<DeleteIndexResponse, DispatchError>;

    /// Report cluster health, optionally scoped to `request`'s indices.
    async fn cluster_health(&self, request: &AdminRequest) -> Result<HealthSnapshot, DispatchError>;
}

/// Route `request` to the coordinator operation for its kind.
pub async fn run_request(
    coordinator: &dyn ClusterCoordinator,
    request: &AdminRequest,
) -> Result<AdminResponse, DispatchError> {
    match request.kind() {
        OperationKind::DeleteIndex => coordinator
            .delete_index(request)
            .await
            .map(AdminResponse::Acknowledged),
        OperationKind::ClusterHealth => coordinator
            .cluster_health(request)
            .await
            .map(AdminResponse::Health),
    }
}
