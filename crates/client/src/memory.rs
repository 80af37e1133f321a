//! In-memory cluster coordinator.
//!
//! Responsibilities:
//! - Hold a small model of cluster state: nodes, indices and their shards.
//! - Serve [`ClusterCoordinator`] calls against that state, resolving targets
//!   with [`resolve_indices`].
//! - Simulate latency and injected failures so timeouts and error paths can
//!   be exercised without a real cluster.
//!
//! Does NOT handle:
//! - Shard allocation. Health is derived from replica counts versus data nodes.
//!
//! Invariants:
//! - All state lives behind a single `tokio::sync::RwLock`; reads take the
//!   read lock, deletions take the write lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::coordinator::ClusterCoordinator;
use crate::error::{DispatchError, DispatchErrorKind};
use crate::models::{DeleteIndexResponse, HealthSnapshot, HealthStatus};
use crate::request::AdminRequest;
use crate::resolve::{IndexCatalog, IndexState, resolve_indices};
use crate::time_value::format_time_value;

/// Metadata for one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMetadata {
    pub name: String,
    pub state: IndexState,
    pub primary_shards: u32,
    pub replicas: u32,
}

#[derive(Debug, Default)]
struct ClusterState {
    cluster_name: String,
    number_of_nodes: u32,
    number_of_data_nodes: u32,
    indices: Vec<IndexMetadata>,
    relocating_shards: u32,
    initializing_shards: u32,
    status_override: Option<HealthStatus>,
    latency: Option<Duration>,
    injected_failure: Option<DispatchError>,
    frozen_time: Option<DateTime<Utc>>,
}

impl IndexCatalog for ClusterState {
    fn index_states(&self) -> Vec<(String, IndexState)> {
        self.indices
            .iter()
            .map(|index| (index.name.clone(), index.state))
            .collect()
    }

    fn index_state(&self, name: &str) -> Option<IndexState> {
        self.indices
            .iter()
            .find(|index| index.name == name)
            .map(|index| index.state)
    }
}

impl ClusterState {
    fn health(&self, scope: Option<&[String]>) -> HealthSnapshot {
        let replica_slots = self.number_of_data_nodes.saturating_sub(1);
        let mut active_primary_shards = 0;
        let mut active_shards = 0;
        let mut unassigned_shards = 0;

        let in_scope = self.indices.iter().filter(|index| {
            index.state == IndexState::Open
                && scope.is_none_or(|names| names.contains(&index.name))
        });
        for index in in_scope {
            if self.number_of_data_nodes == 0 {
                unassigned_shards += index.primary_shards * (1 + index.replicas);
                continue;
            }
            let placed = index.replicas.min(replica_slots);
            active_primary_shards += index.primary_shards;
            active_shards += index.primary_shards * (1 + placed);
            unassigned_shards += index.primary_shards * (index.replicas - placed);
        }

        let derived = if self.number_of_data_nodes == 0 && unassigned_shards > 0 {
            HealthStatus::Red
        } else if unassigned_shards > 0 || self.initializing_shards > 0 {
            HealthStatus::Yellow
        } else {
            HealthStatus::Green
        };

        HealthSnapshot {
            cluster_name: self.cluster_name.clone(),
            status: self.status_override.unwrap_or(derived),
            number_of_nodes: self.number_of_nodes,
            number_of_data_nodes: self.number_of_data_nodes,
            active_shards,
            active_primary_shards,
            relocating_shards: self.relocating_shards,
            initializing_shards: self.initializing_shards,
            unassigned_shards,
            captured_at: self.frozen_time.unwrap_or_else(Utc::now),
        }
    }
}

/// A [`ClusterCoordinator`] backed by in-process state.
#[derive(Debug)]
pub struct InMemoryCluster {
    state: RwLock<ClusterState>,
}

impl InMemoryCluster {
    /// Create an empty single-node cluster.
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(ClusterState {
                cluster_name: cluster_name.into(),
                number_of_nodes: 1,
                number_of_data_nodes: 1,
                ..ClusterState::default()
            }),
        }
    }

    /// Set total and data node counts.
    pub fn with_nodes(mut self, total: u32, data: u32) -> Self {
        let state = self.state.get_mut();
        state.number_of_nodes = total;
        state.number_of_data_nodes = data;
        self
    }

    /// Add an index with one primary shard and no replicas.
    pub fn with_index(self, name: impl Into<String>, state: IndexState) -> Self {
        self.with_sharded_index(name, state, 1, 0)
    }

    /// Add an index with explicit shard layout.
    pub fn with_sharded_index(
        mut self,
        name: impl Into<String>,
        state: IndexState,
        primary_shards: u32,
        replicas: u32,
    ) -> Self {
        self.state.get_mut().indices.push(IndexMetadata {
            name: name.into(),
            state,
            primary_shards,
            replicas,
        });
        self
    }

    /// Report shards in motion.
    pub fn with_shard_activity(mut self, relocating: u32, initializing: u32) -> Self {
        let state = self.state.get_mut();
        state.relocating_shards = relocating;
        state.initializing_shards = initializing;
        self
    }

    /// Report `status` regardless of shard layout.
    pub fn with_status(mut self, status: HealthStatus) -> Self {
        self.state.get_mut().status_override = Some(status);
        self
    }

    /// Delay every call by `latency`. Calls whose timeout is shorter fail with
    /// a `timeout` error once the timeout elapses.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.state.get_mut().latency = Some(latency);
        self
    }

    /// Stamp snapshots with a fixed capture time.
    pub fn with_frozen_time(mut self, at: DateTime<Utc>) -> Self {
        self.state.get_mut().frozen_time = Some(at);
        self
    }

    /// Fail the next call with `error`.
    pub async fn inject_failure(&self, error: DispatchError) {
        self.state.write().await.injected_failure = Some(error);
    }

    /// Add an index at runtime.
    pub async fn create_index(&self, name: impl Into<String>, state: IndexState) {
        self.state.write().await.indices.push(IndexMetadata {
            name: name.into(),
            state,
            primary_shards: 1,
            replicas: 0,
        });
    }

    /// Names of every index, in creation order.
    pub async fn index_names(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .indices
            .iter()
            .map(|index| index.name.clone())
            .collect()
    }

    async fn before_call(&self, request: &AdminRequest) -> Result<(), DispatchError> {
        let (latency, injected) = {
            let mut state = self.state.write().await;
            (state.latency, state.injected_failure.take())
        };

        if let Some(error) = injected {
            return Err(error);
        }

        if let Some(latency) = latency {
            let timeout = request.timeout().min(request.master_node_timeout());
            if latency >= timeout {
                tokio::time::sleep(timeout).await;
                return Err(DispatchError::new(
                    DispatchErrorKind::Timeout,
                    format!(
                        "[{}] timed out after [{}]",
                        request.kind().action_name(),
                        format_time_value(timeout)
                    ),
                ));
            }
            tokio::time::sleep(latency).await;
        }

        Ok(())
    }
}

#[async_trait]
impl ClusterCoordinator for InMemoryCluster {
    async fn delete_index(
        &self,
        request: &AdminRequest,
    ) -> Result<DeleteIndexResponse, DispatchError> {
        self.before_call(request).await?;

        let mut state = self.state.write().await;
        let targets = resolve_indices(request.indices(), request.indices_options(), &*state)?;
        state.indices.retain(|index| !targets.contains(&index.name));

        tracing::debug!(
            cluster = %state.cluster_name,
            deleted = targets.len(),
            "Deleted indices"
        );
        Ok(DeleteIndexResponse::acknowledged(targets))
    }

    async fn cluster_health(&self, request: &AdminRequest) -> Result<HealthSnapshot, DispatchError> {
        self.before_call(request).await?;

        let state = self.state.read().await;
        if request.targets_all() {
            return Ok(state.health(None));
        }
        let scope = resolve_indices(request.indices(), request.indices_options(), &*state)?;
        Ok(state.health(Some(&scope)))
    }
}
