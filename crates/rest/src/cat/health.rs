//! `GET /_cat/health`.
//!
//! Responsibilities:
//! - Build a cluster health request from `timeout` and `master_timeout`.
//! - Project the snapshot into a one-row table.
//!
//! Invariants:
//! - `time(ms)` and `timestamp` are both derived from the snapshot's capture
//!   time, in UTC.

use std::sync::Arc;

use admin_client::{
    AdminError, AdminResponse, Dispatcher, HealthSnapshot, RequestBuilder, ResponseListenerExt,
    Result,
};
use admin_config::AdminConfig;
use admin_config::constants::TIMESTAMP_FORMAT;

use crate::cat::CatAction;
use crate::controller::RestHandler;
use crate::listener::{RestTableListener, send_help};
use crate::render::RenderOptions;
use crate::table::{Alignment, Cell, Column, ColumnProjector};
use crate::transport::{RestChannel, RestRequest};

/// Columns of the health table, in output order.
pub const HEALTH_COLUMNS: &[Column<HealthSnapshot>] = &[
    Column {
        name: "time(ms)",
        alignment: Alignment::Left,
        description: "time, in milliseconds since epoch UTC, that the count was executed",
        value: |h| Cell::Integer(h.epoch_millis()),
    },
    Column {
        name: "timestamp",
        alignment: Alignment::Left,
        description: "time that the count was executed",
        value: |h| Cell::Text(h.captured_at.format(TIMESTAMP_FORMAT).to_string()),
    },
    Column {
        name: "cluster",
        alignment: Alignment::Left,
        description: "cluster name",
        value: |h| Cell::from(h.cluster_name.as_str()),
    },
    Column {
        name: "status",
        alignment: Alignment::Left,
        description: "health status",
        value: |h| Cell::from(h.status.as_str()),
    },
    Column {
        name: "nodeTotal",
        alignment: Alignment::Right,
        description: "total number of nodes",
        value: |h| Cell::from(h.number_of_nodes),
    },
    Column {
        name: "nodeData",
        alignment: Alignment::Right,
        description: "number of nodes that can store data",
        value: |h| Cell::from(h.number_of_data_nodes),
    },
    Column {
        name: "shards",
        alignment: Alignment::Right,
        description: "total number of shards",
        value: |h| Cell::from(h.active_shards),
    },
    Column {
        name: "pri",
        alignment: Alignment::Right,
        description: "number of primary shards",
        value: |h| Cell::from(h.active_primary_shards),
    },
    Column {
        name: "relo",
        alignment: Alignment::Right,
        description: "number of relocating nodes",
        value: |h| Cell::from(h.relocating_shards),
    },
    Column {
        name: "init",
        alignment: Alignment::Right,
        description: "number of initializing nodes",
        value: |h| Cell::from(h.initializing_shards),
    },
    Column {
        name: "unassign",
        alignment: Alignment::Right,
        description: "number of unassigned shards",
        value: |h| Cell::from(h.unassigned_shards),
    },
];

pub fn health_projector() -> ColumnProjector<HealthSnapshot> {
    ColumnProjector::new(HEALTH_COLUMNS)
}

/// Cluster health as a table.
pub struct RestHealthAction {
    dispatcher: Dispatcher,
    config: Arc<AdminConfig>,
}

impl RestHealthAction {
    pub fn new(dispatcher: Dispatcher, config: Arc<AdminConfig>) -> Self {
        Self { dispatcher, config }
    }
}

impl RestHandler for RestHealthAction {
    fn handle_request(&self, request: RestRequest, channel: Arc<dyn RestChannel>) -> Result<()> {
        let projector = health_projector();
        if request.flag("help", false)? {
            return send_help(&projector, &request, channel.as_ref());
        }

        let options = RenderOptions::from_request(&request)?;
        let mut builder = RequestBuilder::cluster_health(Vec::<String>::new(), &self.config);
        if let Some(timeout) = request.param("timeout") {
            builder.with_timeout_str(timeout)?;
        }
        if let Some(timeout) = request.param("master_timeout") {
            builder.with_master_node_timeout_str(timeout)?;
        }

        let listener = RestTableListener::new(request, channel, projector, options)
            .map_response(|response: AdminResponse| {
                response.into_health().map_err(AdminError::from)
            });
        builder.execute(&self.dispatcher, listener)
    }
}

impl CatAction for RestHealthAction {
    fn documentation(&self) -> &'static str {
        "/_cat/health"
    }
}
