//! Listener that answers a REST request with a table.
//!
//! Responsibilities:
//! - Project a successful response, render it and send it on the channel.
//! - Render any failure as a structured error body.
//!
//! Invariants:
//! - Exactly one response is attempted per success, plus at most one error
//!   response when projection, rendering or sending fails.
//! - A failure to send the error body is logged and dropped, never retried.

use std::sync::Arc;

use admin_client::{AdminError, ResponseListener};

use crate::render::{RenderOptions, error_response, render, render_help};
use crate::table::TableProjector;
use crate::transport::{RestChannel, RestRequest, RestResponse};

/// Completes a dispatched request by rendering its outcome on a channel.
pub struct RestTableListener<P: TableProjector> {
    request: RestRequest,
    channel: Arc<dyn RestChannel>,
    projector: P,
    options: RenderOptions,
}

impl<P: TableProjector> RestTableListener<P> {
    pub fn new(
        request: RestRequest,
        channel: Arc<dyn RestChannel>,
        projector: P,
        options: RenderOptions,
    ) -> Self {
        Self {
            request,
            channel,
            projector,
            options,
        }
    }

    fn respond(&self, item: &P::Item) -> Result<(), AdminError> {
        let table = self.projector.project(item, &self.request)?;
        let response = render(&table, &self.options)?;
        self.channel.send_response(response)?;
        Ok(())
    }
}

impl<P> ResponseListener<P::Item> for RestTableListener<P>
where
    P: TableProjector,
    P::Item: Send + 'static,
{
    fn on_success(self, response: P::Item) {
        if let Err(error) = self.respond(&response) {
            tracing::warn!(
                error = %error,
                path = %self.request.path(),
                "Failed to send table response"
            );
            self.on_failure(error);
        }
    }

    fn on_failure(self, error: AdminError) {
        tracing::debug!(error = %error, status = error.status(), "Sending error response");
        if let Err(send_error) = self.channel.send_response(error_response(&error)) {
            tracing::error!(
                error = %send_error,
                original = %error,
                path = %self.request.path(),
                "Failed to send failure response"
            );
        }
    }
}

/// Answer a `help` request with the projector's column descriptions.
pub fn send_help<P: TableProjector>(
    projector: &P,
    request: &RestRequest,
    channel: &dyn RestChannel,
) -> Result<(), AdminError> {
    let help = render_help(&projector.header(request));
    channel.send_response(RestResponse::text(200, help))?;
    Ok(())
}
