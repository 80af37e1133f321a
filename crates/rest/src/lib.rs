//! REST boundary for the administrative pipeline.
//!
//! Maps inbound requests onto [`admin_client::RequestBuilder`] and
//! [`admin_client::Dispatcher`], then renders outcomes as cat-style tables or
//! structured JSON errors.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut controller = RestController::new();
//! register_default_handlers(&mut controller, dispatcher, Arc::new(config))?;
//! controller.dispatch_request(RestRequest::new(Method::Get, "/_cat/health?v"), channel);
//! ```

pub mod cat;
pub mod controller;
pub mod error;
pub mod indices;
pub mod listener;
pub mod render;
pub mod table;
pub mod transport;

use std::sync::Arc;

use admin_client::Dispatcher;
use admin_config::AdminConfig;

pub use cat::{CatAction, RestCatAction, RestHealthAction};
pub use controller::{RestController, RestHandler};
pub use error::{ControllerError, TableError, TransportError};
pub use indices::RestDeleteIndexAction;
pub use listener::RestTableListener;
pub use render::{OutputFormat, RenderOptions};
pub use table::{Alignment, Cell, Column, ColumnDef, ColumnProjector, Table, TableProjector};
pub use transport::{MemoryChannel, Method, RestChannel, RestRequest, RestResponse};

/// Register the health, cat index and delete index endpoints.
///
/// # Errors
/// Fails if any of the routes is already registered on `controller`.
pub fn register_default_handlers(
    controller: &mut RestController,
    dispatcher: Dispatcher,
    config: Arc<AdminConfig>,
) -> Result<(), ControllerError> {
    let health = Arc::new(RestHealthAction::new(dispatcher.clone(), Arc::clone(&config)));
    let cat = Arc::new(RestCatAction::new(vec![health.documentation()]));
    let delete: Arc<dyn RestHandler> = Arc::new(RestDeleteIndexAction::new(dispatcher, config));

    controller.register_handler(Method::Get, "/_cat/health", health)?;
    controller.register_handler(Method::Get, "/_cat", cat)?;
    controller.register_handler(Method::Delete, "/{index}", Arc::clone(&delete))?;
    controller.register_handler(Method::Delete, "/", delete)?;
    Ok(())
}
