//! Error types for the administrative client.
//!
//! Invariants:
//! - `Validation` and `Parse` are produced synchronously by request builders and
//!   never reach a coordinator.
//! - `Dispatch` is only ever delivered through a listener's failure path.
//! - `Serialization` is terminal at the transport boundary.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AdminError>;

/// Classification of coordinator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchErrorKind {
    /// A named or required index does not exist.
    IndexNotFound,
    /// A closed index was targeted while closed indices are forbidden.
    IndexClosed,
    /// The coordinator gave up waiting (acknowledgement or master timeout).
    Timeout,
    /// Cluster state could not be read or is blocked.
    ClusterUnavailable,
    /// The request could not reach the coordinating node.
    Transport,
    /// The request was malformed when it reached the dispatcher.
    InvalidRequest,
    /// The coordinator answered with a payload of the wrong kind.
    UnexpectedResponse,
    /// The dispatch itself failed: shutdown, panic, or a dropped task.
    DispatchFailed,
}

impl DispatchErrorKind {
    /// Returns the canonical label for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DispatchErrorKind::IndexNotFound => "index_not_found",
            DispatchErrorKind::IndexClosed => "index_closed",
            DispatchErrorKind::Timeout => "timeout",
            DispatchErrorKind::ClusterUnavailable => "cluster_unavailable",
            DispatchErrorKind::Transport => "transport",
            DispatchErrorKind::InvalidRequest => "invalid_request",
            DispatchErrorKind::UnexpectedResponse => "unexpected_response",
            DispatchErrorKind::DispatchFailed => "dispatch_failed",
        }
    }

    /// HTTP status used when this failure is rendered at the transport boundary.
    pub const fn status(&self) -> u16 {
        match self {
            DispatchErrorKind::IndexNotFound => 404,
            DispatchErrorKind::IndexClosed => 403,
            DispatchErrorKind::Timeout => 408,
            DispatchErrorKind::ClusterUnavailable => 503,
            DispatchErrorKind::Transport => 502,
            DispatchErrorKind::InvalidRequest => 400,
            DispatchErrorKind::UnexpectedResponse | DispatchErrorKind::DispatchFailed => 500,
        }
    }
}

impl fmt::Display for DispatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured coordinator failure with an optional cause chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {reason}")]
pub struct DispatchError {
    kind: DispatchErrorKind,
    reason: String,
    #[source]
    cause: Option<Box<DispatchError>>,
}

impl DispatchError {
    /// Create a new error of the given kind.
    pub fn new(kind: DispatchErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            cause: None,
        }
    }

    /// Attach the error that caused this one.
    pub fn with_cause(mut self, cause: DispatchError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// `no such index [name]`.
    pub fn index_not_found(index: &str) -> Self {
        Self::new(
            DispatchErrorKind::IndexNotFound,
            format!("no such index [{}]", index),
        )
    }

    /// `index [name] is closed`.
    pub fn index_closed(index: &str) -> Self {
        Self::new(
            DispatchErrorKind::IndexClosed,
            format!("index [{}] is closed", index),
        )
    }

    /// A synthetic failure for work that could not be carried out.
    pub fn dispatch_failed(reason: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::DispatchFailed, reason)
    }

    pub fn kind(&self) -> DispatchErrorKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn cause(&self) -> Option<&DispatchError> {
        self.cause.as_deref()
    }

    /// Iterate over the cause chain, nearest cause first.
    pub fn causes(&self) -> impl Iterator<Item = &DispatchError> {
        std::iter::successors(self.cause(), |e| e.cause())
    }
}

/// Errors produced anywhere in the administrative pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Builder input was malformed or inconsistent.
    #[error("Validation Failed: {}", format_validation(.0))]
    Validation(Vec<String>),

    /// Textual input (a duration, a boolean flag) could not be parsed.
    #[error("failed to parse setting [{setting}] with value [{value}]: {reason}")]
    Parse {
        setting: String,
        value: String,
        reason: String,
    },

    /// The coordinator call failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A table or error body could not be rendered for the transport.
    #[error("failed to serialize {what}: {reason}")]
    Serialization { what: String, reason: String },
}

fn format_validation(errors: &[String]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}: {};", i + 1, e))
        .collect()
}

impl AdminError {
    /// Create a parse error for a named setting.
    pub fn parse(
        setting: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AdminError::Parse {
            setting: setting.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(what: impl Into<String>, reason: impl fmt::Display) -> Self {
        AdminError::Serialization {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status used when this error is rendered at the transport boundary.
    pub fn status(&self) -> u16 {
        match self {
            AdminError::Validation(_) | AdminError::Parse { .. } => 400,
            AdminError::Dispatch(e) => e.kind().status(),
            AdminError::Serialization { .. } => 500,
        }
    }

    /// Machine-readable error type name.
    pub fn error_type(&self) -> &'static str {
        match self {
            AdminError::Validation(_) => "action_request_validation_exception",
            AdminError::Parse { .. } => "parse_exception",
            AdminError::Dispatch(e) => e.kind().as_str(),
            AdminError::Serialization { .. } => "serialization_exception",
        }
    }

    /// Low-cardinality label for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            AdminError::Validation(_) => "validation",
            AdminError::Parse { .. } => "parse",
            AdminError::Dispatch(e) => e.kind().as_str(),
            AdminError::Serialization { .. } => "serialization",
        }
    }

    /// Returns the dispatch kind when this is a coordinator failure.
    pub fn dispatch_kind(&self) -> Option<DispatchErrorKind> {
        match self {
            AdminError::Dispatch(e) => Some(e.kind()),
            _ => None,
        }
    }
}
