//! Asynchronous administrative-action pipeline.
//!
//! This crate builds typed administrative requests (index deletion, cluster
//! health), dispatches them to a [`ClusterCoordinator`] without blocking the
//! caller, and delivers exactly one outcome per request to a
//! [`ResponseListener`].

pub mod builder;
pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod indices_options;
pub mod listener;
pub mod memory;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod request;
pub mod resolve;
pub mod telemetry;
pub mod time_value;

pub use builder::RequestBuilder;
pub use coordinator::ClusterCoordinator;
pub use dispatcher::Dispatcher;
pub use error::{AdminError, DispatchError, DispatchErrorKind, Result};
pub use indices_options::{ExpandWildcards, IndicesOptions, OptionFlags};
pub use listener::{
    MappedListener, OneshotListener, ResponseFuture, ResponseListener, ResponseListenerExt,
    oneshot_listener,
};
pub use memory::InMemoryCluster;
pub use metrics::MetricsCollector;
pub use models::{AdminResponse, DeleteIndexResponse, HealthSnapshot, HealthStatus};
pub use request::{AdminRequest, OperationKind};
pub use resolve::{IndexState, resolve_indices};
pub use time_value::{format_time_value, parse_time_value};
