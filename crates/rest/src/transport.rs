//! Transport boundary types.
//!
//! Responsibilities:
//! - Parse a request line (method, path, query string) into a [`RestRequest`].
//! - Provide typed accessors for query and path parameters.
//! - Define the [`RestChannel`] a handler answers on, plus an in-memory
//!   implementation for embedding and tests.
//!
//! Does NOT handle:
//! - Sockets, HTTP framing or content negotiation beyond `format`.
//!
//! Invariants:
//! - Bodies are UTF-8 text.
//! - Query parameter names are unique; the last occurrence wins.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use admin_client::indices_options::parse_flag;
use admin_client::{AdminError, Result};
use percent_encoding::percent_decode_str;
use tokio::sync::Notify;

use crate::error::TransportError;

/// Content type of text tables and help output.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// Content type of JSON tables and error bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Head,
}

impl Method {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "PUT" => Ok(Method::Put),
            "POST" => Ok(Method::Post),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            _ => Err(AdminError::parse("method", s, "unsupported HTTP method")),
        }
    }
}

/// An inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    method: Method,
    uri: String,
    path: String,
    params: HashMap<String, String>,
    path_params: HashMap<String, String>,
}

impl RestRequest {
    /// Parse `uri` (path plus optional `?query`).
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let (raw_path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri.as_str(), None),
        };

        let path = if raw_path.is_empty() {
            "/".to_string()
        } else {
            raw_path.to_string()
        };
        let params = query.map(parse_query).unwrap_or_default();

        Self {
            method,
            path,
            params,
            path_params: HashMap::new(),
            uri,
        }
    }

    /// Set or replace a query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The request target as received, including the query string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Boolean query parameter. A bare `?v` counts as `true`.
    pub fn flag(&self, name: &str, default: bool) -> Result<bool> {
        match self.param(name) {
            Some(value) => parse_flag(name, value),
            None => Ok(default),
        }
    }

    /// Comma separated query parameter, empty entries dropped.
    pub fn param_list(&self, name: &str) -> Option<Vec<String>> {
        self.param(name).map(split_list)
    }

    /// Value bound to a `{name}` segment of the matched route.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// Comma separated path parameter; an absent parameter yields an empty list.
    pub fn path_param_list(&self, name: &str) -> Vec<String> {
        self.path_param(name).map(split_list).unwrap_or_default()
    }

    pub(crate) fn set_path_params(&mut self, params: HashMap<String, String>) {
        self.path_params = params;
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (decode(name), decode(value)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

/// Percent-decode a query component, where `+` is a space.
fn decode(component: &str) -> String {
    decode_path_segment(&component.replace('+', " "))
}

/// Percent-decode one path segment.
pub(crate) fn decode_path_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// An outbound response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl RestResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_CONTENT_TYPE,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: JSON_CONTENT_TYPE,
            body: body.into(),
        }
    }
}

/// Where a handler writes its single response.
pub trait RestChannel: Send + Sync {
    fn send_response(&self, response: RestResponse) -> std::result::Result<(), TransportError>;
}

/// Channel that keeps every response in memory.
///
/// A failing channel rejects every send but still counts the attempt.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    responses: Mutex<Vec<RestResponse>>,
    attempts: AtomicUsize,
    failing: AtomicBool,
    notify: Notify,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel whose sends always fail with [`TransportError::Closed`].
    pub fn failing() -> Self {
        let channel = Self::default();
        channel.failing.store(true, Ordering::SeqCst);
        channel
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `send_response` calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn responses(&self) -> Vec<RestResponse> {
        self.lock().clone()
    }

    /// The first recorded response, if any.
    pub fn first(&self) -> Option<RestResponse> {
        self.lock().first().cloned()
    }

    /// Wait until `count` send attempts have been made or `timeout` elapses.
    ///
    /// Returns `true` when the count was reached.
    pub async fn wait_for_attempts(&self, count: usize, timeout: Duration) -> bool {
        let wait = async {
            loop {
                let notified = self.notify.notified();
                if self.attempts() >= count {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait).await.is_ok()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RestResponse>> {
        // A poisoned lock still holds a consistent Vec.
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RestChannel for MemoryChannel {
    fn send_response(&self, response: RestResponse) -> std::result::Result<(), TransportError> {
        let result = if self.failing.load(Ordering::SeqCst) {
            Err(TransportError::Closed("connection reset by peer".to_string()))
        } else {
            self.lock().push(response);
            Ok(())
        };
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_waiters();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_and_query() {
        let request = RestRequest::new(
            Method::Get,
            "/_cat/health?v&h=cluster,status&timeout=5s&name=a%20b",
        );

        assert_eq!(request.path(), "/_cat/health");
        assert_eq!(request.param("h"), Some("cluster,status"));
        assert_eq!(request.param("timeout"), Some("5s"));
        assert_eq!(request.param("name"), Some("a b"));
        assert!(request.has_param("v"));
        assert!(request.flag("v", false).unwrap());
        assert!(!request.flag("help", false).unwrap());
    }

    #[test]
    fn test_empty_uri_is_root() {
        let request = RestRequest::new(Method::Delete, "");
        assert_eq!(request.path(), "/");
        assert!(request.path_param_list("index").is_empty());
    }

    #[test]
    fn test_invalid_flag_is_parse_error() {
        let request = RestRequest::new(Method::Get, "/_cat/health?v=yes");
        assert!(matches!(
            request.flag("v", false),
            Err(AdminError::Parse { .. })
        ));
    }

    #[test]
    fn test_param_list_drops_empty_entries() {
        let request = RestRequest::new(Method::Get, "/x?h=a,,b%2Cc, ");
        assert_eq!(
            request.param_list("h"),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("delete".parse::<Method>().unwrap(), Method::Delete);
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn test_failing_channel_counts_attempts() {
        let channel = MemoryChannel::failing();
        let err = channel
            .send_response(RestResponse::text(200, "ok"))
            .unwrap_err();

        assert!(matches!(err, TransportError::Closed(_)));
        assert_eq!(channel.attempts(), 1);
        assert!(channel.responses().is_empty());
    }

    #[tokio::test]
    async fn test_wait_for_attempts() {
        let channel = std::sync::Arc::new(MemoryChannel::new());
        let sender = std::sync::Arc::clone(&channel);
        tokio::spawn(async move {
            let _ = sender.send_response(RestResponse::json(200, "[]"));
        });

        assert!(
            channel
                .wait_for_attempts(1, Duration::from_secs(5))
                .await
        );
        assert_eq!(channel.first().unwrap().body, "[]");
    }
}
