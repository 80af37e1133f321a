//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Clusters built here use a frozen capture time so health rows are stable.
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use admin_client::{
    AdminError, AdminRequest, AdminResponse, ClusterCoordinator, DeleteIndexResponse,
    DispatchError, HealthSnapshot, InMemoryCluster, IndexState, Result,
};
use admin_config::AdminConfig;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// Capture time used by [`sample_cluster`].
#[allow(dead_code)]
pub fn frozen_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 30)
        .single()
        .expect("valid timestamp")
}

/// A three-node cluster with a mix of open and closed indices.
#[allow(dead_code)]
pub fn sample_cluster() -> InMemoryCluster {
    InMemoryCluster::new("logs")
        .with_nodes(3, 2)
        .with_frozen_time(frozen_time())
        .with_index("logs-2024.01", IndexState::Open)
        .with_index("logs-2024.02", IndexState::Open)
        .with_index("logs-2023.12", IndexState::Closed)
        .with_index("metrics", IndexState::Open)
}

#[allow(dead_code)]
pub fn config() -> AdminConfig {
    AdminConfig::default()
}

/// Records every outcome delivered to listeners created from it.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct OutcomeLog {
    outcomes: Arc<Mutex<Vec<(usize, Result<AdminResponse>)>>>,
}

#[allow(dead_code)]
impl OutcomeLog {
    pub fn listener(&self, id: usize) -> impl FnOnce(Result<AdminResponse>) + Send + 'static {
        let outcomes = Arc::clone(&self.outcomes);
        move |outcome| outcomes.lock().expect("outcome log poisoned").push((id, outcome))
    }

    pub fn take(&self) -> Vec<(usize, Result<AdminResponse>)> {
        std::mem::take(&mut *self.outcomes.lock().expect("outcome log poisoned"))
    }

    pub fn len(&self) -> usize {
        self.outcomes.lock().expect("outcome log poisoned").len()
    }
}

/// Coordinator that panics on every call.
#[allow(dead_code)]
pub struct PanickingCoordinator;

#[async_trait]
impl ClusterCoordinator for PanickingCoordinator {
    async fn delete_index(
        &self,
        _request: &AdminRequest,
    ) -> std::result::Result<DeleteIndexResponse, DispatchError> {
        panic!("coordinator exploded");
    }

    async fn cluster_health(
        &self,
        _request: &AdminRequest,
    ) -> std::result::Result<HealthSnapshot, DispatchError> {
        panic!("coordinator exploded");
    }
}

/// Coordinator that never answers.
#[allow(dead_code)]
pub struct StalledCoordinator;

#[async_trait]
impl ClusterCoordinator for StalledCoordinator {
    async fn delete_index(
        &self,
        _request: &AdminRequest,
    ) -> std::result::Result<DeleteIndexResponse, DispatchError> {
        std::future::pending().await
    }

    async fn cluster_health(
        &self,
        _request: &AdminRequest,
    ) -> std::result::Result<HealthSnapshot, DispatchError> {
        std::future::pending().await
    }
}

/// Assert that `outcome` is a `dispatch_failed` error.
#[allow(dead_code)]
pub fn assert_dispatch_failed(outcome: &Result<AdminResponse>) {
    match outcome {
        Err(AdminError::Dispatch(err)) => assert_eq!(
            err.kind(),
            admin_client::DispatchErrorKind::DispatchFailed,
            "unexpected dispatch error: {}",
            err
        ),
        other => panic!("Expected dispatch_failed, got {:?}", other),
    }
}
