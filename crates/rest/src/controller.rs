//! Request routing.
//!
//! Responsibilities:
//! - Register handlers by method and path template (`/{index}`).
//! - Route each request to exactly one handler and bind path parameters.
//! - Answer unroutable requests and synchronous handler errors on the channel.
//!
//! Does NOT handle:
//! - Asynchronous outcomes; handlers hand those to a listener that owns the
//!   channel.
//!
//! Invariants:
//! - Two routes with the same method and segment shape cannot coexist.
//! - When several templates match, the one with the most literal segments
//!   wins.

use std::collections::HashMap;
use std::sync::Arc;

use admin_client::{AdminError, Result};
use serde_json::json;
use tracing::info_span;

use crate::error::ControllerError;
use crate::render::error_response;
use crate::transport::{Method, RestChannel, RestRequest, RestResponse, decode_path_segment};

/// Handles requests for one route.
pub trait RestHandler: Send + Sync {
    /// Handle `request`, answering on `channel` now or later.
    ///
    /// # Errors
    /// A returned error means nothing was sent and nothing was dispatched;
    /// the controller renders it on the channel.
    fn handle_request(&self, request: RestRequest, channel: Arc<dyn RestChannel>) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn same_shape(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            (Segment::Param(_), Segment::Param(_)) => true,
            _ => false,
        }
    }
}

struct Route {
    method: Method,
    path: String,
    segments: Vec<Segment>,
    handler: Arc<dyn RestHandler>,
}

impl Route {
    fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    fn matches(&self, method: Method, parts: &[&str]) -> Option<HashMap<String, String>> {
        if self.method != method || self.segments.len() != parts.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), decode_path_segment(part));
                }
            }
        }
        Some(params)
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn parse_template(path: &str) -> std::result::Result<Vec<Segment>, ControllerError> {
    if !path.starts_with('/') {
        return Err(ControllerError::InvalidPath {
            path: path.to_string(),
            reason: "must start with '/'".to_string(),
        });
    }

    split_path(path)
        .into_iter()
        .map(|part| match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            Some("") => Err(ControllerError::InvalidPath {
                path: path.to_string(),
                reason: "empty parameter name".to_string(),
            }),
            Some(name) => Ok(Segment::Param(name.to_string())),
            None => Ok(Segment::Literal(part.to_string())),
        })
        .collect()
}

/// Routes requests to registered handlers.
#[derive(Default)]
pub struct RestController {
    routes: Vec<Route>,
}

impl std::fmt::Debug for RestController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let routes: Vec<String> = self
            .routes
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect();
        f.debug_struct("RestController")
            .field("routes", &routes)
            .finish()
    }
}

impl RestController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` and the path template `path`.
    ///
    /// # Errors
    /// Returns an error for a malformed template or when a route with the same
    /// method and shape is already registered.
    pub fn register_handler(
        &mut self,
        method: Method,
        path: &str,
        handler: Arc<dyn RestHandler>,
    ) -> std::result::Result<(), ControllerError> {
        let segments = parse_template(path)?;

        let duplicate = self.routes.iter().any(|route| {
            route.method == method
                && route.segments.len() == segments.len()
                && route
                    .segments
                    .iter()
                    .zip(&segments)
                    .all(|(a, b)| a.same_shape(b))
        });
        if duplicate {
            return Err(ControllerError::DuplicateRoute {
                method: method.to_string(),
                path: path.to_string(),
            });
        }

        tracing::debug!(method = %method, path, "Registered handler");
        self.routes.push(Route {
            method,
            path: path.to_string(),
            segments,
            handler,
        });
        Ok(())
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route `request` and let its handler answer on `channel`.
    pub fn dispatch_request(&self, mut request: RestRequest, channel: Arc<dyn RestChannel>) {
        let span = info_span!(
            "rest.request",
            method = %request.method(),
            path = %request.path(),
        );
        let _entered = span.enter();

        let parts = split_path(request.path());
        let matched = self
            .routes
            .iter()
            .filter_map(|route| {
                route
                    .matches(request.method(), &parts)
                    .map(|params| (route, params))
            })
            .max_by_key(|(route, _)| route.literal_count());

        let Some((route, params)) = matched else {
            tracing::debug!("No handler found");
            send_or_log(channel.as_ref(), no_handler_response(&request));
            return;
        };

        request.set_path_params(params);
        if let Err(error) = route.handler.handle_request(request, Arc::clone(&channel)) {
            tracing::debug!(error = %error, "Handler rejected request");
            send_or_log(channel.as_ref(), error_response(&error));
        }
    }
}

fn no_handler_response(request: &RestRequest) -> RestResponse {
    let reason = format!(
        "no handler found for uri [{}] and method [{}]",
        request.uri(),
        request.method()
    );
    let body = json!({
        "error": {
            "type": "no_handler_found",
            "reason": reason,
        },
        "status": 400,
    });
    RestResponse::json(400, body.to_string())
}

/// Send `response`, logging a transport failure instead of propagating it.
pub(crate) fn send_or_log(channel: &dyn RestChannel, response: RestResponse) {
    let status = response.status;
    if let Err(error) = channel.send_response(response) {
        let error = AdminError::from(error);
        tracing::error!(error = %error, status, "Failed to send response");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryChannel;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(String, Option<String>)>>,
    }

    impl RestHandler for Recorder {
        fn handle_request(
            &self,
            request: RestRequest,
            channel: Arc<dyn RestChannel>,
        ) -> Result<()> {
            if request.has_param("reject") {
                return Err(AdminError::parse("reject", "", "rejected on purpose"));
            }
            self.seen.lock().unwrap().push((
                request.path().to_string(),
                request.path_param("index").map(str::to_string),
            ));
            send_or_log(channel.as_ref(), RestResponse::text(200, "ok"));
            Ok(())
        }
    }

    fn controller(handler: Arc<Recorder>) -> RestController {
        let mut controller = RestController::new();
        controller
            .register_handler(Method::Get, "/_cat/health", handler.clone())
            .unwrap();
        controller
            .register_handler(Method::Delete, "/{index}", handler.clone())
            .unwrap();
        controller
            .register_handler(Method::Get, "/{index}", handler)
            .unwrap();
        controller
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut controller = controller(Arc::new(Recorder::default()));
        let err = controller
            .register_handler(Method::Delete, "/{name}", Arc::new(Recorder::default()))
            .unwrap_err();

        assert!(matches!(err, ControllerError::DuplicateRoute { .. }));
        assert_eq!(controller.len(), 3);
    }

    #[test]
    fn test_invalid_template_rejected() {
        let mut controller = RestController::new();
        let handler: Arc<dyn RestHandler> = Arc::new(Recorder::default());

        assert!(
            controller
                .register_handler(Method::Get, "no-slash", Arc::clone(&handler))
                .is_err()
        );
        assert!(controller.register_handler(Method::Get, "/{}", handler).is_err());
    }

    #[test]
    fn test_path_params_are_bound_and_decoded() {
        let recorder = Arc::new(Recorder::default());
        let controller = controller(Arc::clone(&recorder));
        let channel = Arc::new(MemoryChannel::new());

        controller.dispatch_request(
            RestRequest::new(Method::Delete, "/logs-%2A,metrics"),
            channel.clone(),
        );

        let seen = recorder.seen.lock().unwrap().clone();
        assert_eq!(seen[0].1.as_deref(), Some("logs-*,metrics"));
        assert_eq!(channel.first().unwrap().body, "ok");
    }

    #[test]
    fn test_literal_route_preferred_over_param() {
        let recorder = Arc::new(Recorder::default());
        let mut controller = RestController::new();
        controller
            .register_handler(Method::Get, "/_cat/{kind}", Arc::new(Recorder::default()))
            .unwrap();
        controller
            .register_handler(Method::Get, "/_cat/health", recorder.clone())
            .unwrap();

        controller.dispatch_request(
            RestRequest::new(Method::Get, "/_cat/health"),
            Arc::new(MemoryChannel::new()),
        );

        assert_eq!(recorder.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_route_gets_400() {
        let controller = controller(Arc::new(Recorder::default()));
        let channel = Arc::new(MemoryChannel::new());

        controller.dispatch_request(
            RestRequest::new(Method::Put, "/_cat/health?v"),
            channel.clone(),
        );

        let response = channel.first().unwrap();
        assert_eq!(response.status, 400);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"]["type"], "no_handler_found");
        assert_eq!(
            body["error"]["reason"],
            "no handler found for uri [/_cat/health?v] and method [PUT]"
        );
    }

    #[test]
    fn test_handler_error_is_rendered() {
        let controller = controller(Arc::new(Recorder::default()));
        let channel = Arc::new(MemoryChannel::new());

        controller.dispatch_request(
            RestRequest::new(Method::Get, "/_cat/health?reject"),
            channel.clone(),
        );

        let response = channel.first().unwrap();
        assert_eq!(response.status, 400);
        assert!(response.body.contains("parse_exception"));
    }

    #[test]
    fn test_send_failure_is_logged_not_propagated() {
        let controller = controller(Arc::new(Recorder::default()));
        let channel = Arc::new(MemoryChannel::failing());

        controller.dispatch_request(RestRequest::new(Method::Post, "/nowhere"), channel.clone());

        assert_eq!(channel.attempts(), 1);
    }
}
