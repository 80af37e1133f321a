//! `GET /_cat`: lists every registered cat endpoint.

use std::sync::Arc;

use admin_client::Result;

use crate::controller::{RestHandler, send_or_log};
use crate::transport::{RestChannel, RestRequest, RestResponse};

const CAT_FACE: &str = "=^.^=";

/// Prints the documentation line of each cat endpoint.
#[derive(Debug, Clone, Default)]
pub struct RestCatAction {
    docs: Vec<&'static str>,
}

impl RestCatAction {
    pub fn new(docs: Vec<&'static str>) -> Self {
        Self { docs }
    }

    pub fn body(&self) -> String {
        let mut body = String::from(CAT_FACE);
        body.push('\n');
        for line in &self.docs {
            body.push_str(line);
            body.push('\n');
        }
        body
    }
}

impl RestHandler for RestCatAction {
    fn handle_request(&self, _request: RestRequest, channel: Arc<dyn RestChannel>) -> Result<()> {
        send_or_log(channel.as_ref(), RestResponse::text(200, self.body()));
        Ok(())
    }
}
