//! Shared fixtures for REST integration tests.
//!
//! # Invariants
//! - Clusters use a frozen capture time so health rows are stable.

use std::sync::Arc;
use std::time::Duration;

use admin_client::{Dispatcher, InMemoryCluster, IndexState};
use admin_config::AdminConfig;
use admin_rest::{
    MemoryChannel, Method, RestController, RestRequest, RestResponse, register_default_handlers,
};
use chrono::{DateTime, TimeZone, Utc};

#[allow(dead_code)]
pub fn frozen_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 30)
        .single()
        .expect("valid timestamp")
}

/// Three nodes, two of them data nodes, one five-shard index with a replica
/// and one initializing shard: yellow.
#[allow(dead_code)]
pub fn logs_cluster() -> InMemoryCluster {
    InMemoryCluster::new("logs")
        .with_nodes(3, 2)
        .with_frozen_time(frozen_time())
        .with_sharded_index("logs-2024.01", IndexState::Open, 5, 1)
        .with_index("logs-2023.12", IndexState::Closed)
        .with_shard_activity(0, 1)
}

/// Controller with the default handlers wired to `cluster`.
#[allow(dead_code)]
pub struct Harness {
    pub cluster: Arc<InMemoryCluster>,
    pub dispatcher: Dispatcher,
    pub controller: RestController,
}

#[allow(dead_code)]
impl Harness {
    pub fn new(cluster: InMemoryCluster) -> Self {
        Self::with_config(cluster, AdminConfig::default())
    }

    pub fn with_config(cluster: InMemoryCluster, config: AdminConfig) -> Self {
        let cluster = Arc::new(cluster);
        let dispatcher = Dispatcher::new(cluster.clone());
        let mut controller = RestController::new();
        register_default_handlers(&mut controller, dispatcher.clone(), Arc::new(config))
            .expect("default handlers register once");

        Self {
            cluster,
            dispatcher,
            controller,
        }
    }

    /// Send a request on `channel` and wait for its first response attempt.
    pub async fn call_on(&self, method: Method, uri: &str, channel: Arc<MemoryChannel>) {
        self.controller
            .dispatch_request(RestRequest::new(method, uri), channel.clone());
        assert!(
            channel.wait_for_attempts(1, Duration::from_secs(5)).await,
            "no response for {} {}",
            method,
            uri
        );
    }

    pub async fn call(&self, method: Method, uri: &str) -> RestResponse {
        let channel = Arc::new(MemoryChannel::new());
        self.call_on(method, uri, channel.clone()).await;
        self.dispatcher.wait_idle().await;

        let responses = channel.responses();
        assert_eq!(responses.len(), 1, "expected exactly one response");
        responses[0].clone()
    }
}

#[allow(dead_code)]
pub fn json(response: &RestResponse) -> serde_json::Value {
    serde_json::from_str(&response.body).expect("response body is JSON")
}
