//! `DELETE /{index}` and `DELETE /`.
//!
//! Responsibilities:
//! - Build a delete request from the path and the indices option parameters.
//! - Answer with one `index acknowledged` row per deleted index.
//!
//! Does NOT handle:
//! - Resolving patterns; the coordinator does that under the request's
//!   `IndicesOptions`.

use std::sync::Arc;

use admin_client::{
    AdminError, AdminResponse, DeleteIndexResponse, Dispatcher, IndicesOptions, OperationKind,
    RequestBuilder, ResponseListenerExt, Result,
};
use admin_config::AdminConfig;

use crate::controller::RestHandler;
use crate::error::TableError;
use crate::listener::{RestTableListener, send_help};
use crate::render::RenderOptions;
use crate::table::{Alignment, Cell, Column, ColumnProjector, Table, TableProjector};
use crate::transport::{RestChannel, RestRequest};

/// One deleted index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexAck {
    pub index: String,
    pub acknowledged: bool,
}

pub const DELETE_COLUMNS: &[Column<IndexAck>] = &[
    Column {
        name: "index",
        alignment: Alignment::Left,
        description: "deleted index name",
        value: |ack| Cell::from(ack.index.as_str()),
    },
    Column {
        name: "acknowledged",
        alignment: Alignment::Left,
        description: "whether the deletion was acknowledged by all nodes",
        value: |ack| Cell::from(ack.acknowledged),
    },
];

/// Projects a delete acknowledgement, one row per index.
pub struct DeleteIndexProjector {
    rows: ColumnProjector<IndexAck>,
}

impl DeleteIndexProjector {
    pub fn new() -> Self {
        Self {
            rows: ColumnProjector::new(DELETE_COLUMNS),
        }
    }
}

impl Default for DeleteIndexProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl TableProjector for DeleteIndexProjector {
    type Item = DeleteIndexResponse;

    fn header(&self, request: &RestRequest) -> Table {
        self.rows.header(request)
    }

    fn append(
        &self,
        table: &mut Table,
        item: &DeleteIndexResponse,
        request: &RestRequest,
    ) -> std::result::Result<(), TableError> {
        for index in &item.indices {
            let ack = IndexAck {
                index: index.clone(),
                acknowledged: item.acknowledged,
            };
            self.rows.append(table, &ack, request)?;
        }
        Ok(())
    }
}

/// Deletes the indices named in the path.
pub struct RestDeleteIndexAction {
    dispatcher: Dispatcher,
    config: Arc<AdminConfig>,
}

impl RestDeleteIndexAction {
    pub fn new(dispatcher: Dispatcher, config: Arc<AdminConfig>) -> Self {
        Self { dispatcher, config }
    }
}

fn indices_options(request: &RestRequest) -> Result<IndicesOptions> {
    IndicesOptions::from_parameters(
        request.param("expand_wildcards"),
        request.param("ignore_unavailable"),
        request.param("allow_no_indices"),
        OperationKind::DeleteIndex.default_indices_options(),
    )
}

impl RestHandler for RestDeleteIndexAction {
    fn handle_request(&self, request: RestRequest, channel: Arc<dyn RestChannel>) -> Result<()> {
        let projector = DeleteIndexProjector::new();
        if request.flag("help", false)? {
            return send_help(&projector, &request, channel.as_ref());
        }

        let options = RenderOptions::from_request(&request)?;
        let mut builder =
            RequestBuilder::delete_index(request.path_param_list("index"), &self.config);
        builder.with_indices_options(indices_options(&request)?);
        if let Some(timeout) = request.param("timeout") {
            builder.with_timeout_str(timeout)?;
        }
        if let Some(timeout) = request.param("master_timeout") {
            builder.with_master_node_timeout_str(timeout)?;
        }

        tracing::debug!(indices = ?builder.indices(), "Deleting indices");
        let listener = RestTableListener::new(request, channel, projector, options)
            .map_response(|response: AdminResponse| {
                response.into_acknowledged().map_err(AdminError::from)
            });
        builder.execute(&self.dispatcher, listener)
    }
}
