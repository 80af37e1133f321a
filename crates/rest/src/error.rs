//! Error types for the REST boundary.
//!
//! Invariants:
//! - `TableError` and `TransportError` convert into [`AdminError`] so they can
//!   travel through a listener's failure path.
//! - `ControllerError` only occurs while wiring routes, never per request.

use admin_client::{AdminError, DispatchError, DispatchErrorKind};
use thiserror::Error;

/// Problems building a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A row did not have exactly one cell per column.
    #[error("row has {actual} cells but the table has {expected} columns")]
    ColumnCountMismatch { expected: usize, actual: usize },
}

/// Failure to hand a response to the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer went away before the response could be written.
    #[error("channel closed: {0}")]
    Closed(String),

    /// Writing the response failed.
    #[error("failed to send response: {0}")]
    Send(String),
}

/// Problems registering handlers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("a handler is already registered for [{method} {path}]")]
    DuplicateRoute { method: String, path: String },

    #[error("invalid path [{path}]: {reason}")]
    InvalidPath { path: String, reason: String },
}

impl From<TableError> for AdminError {
    fn from(err: TableError) -> Self {
        AdminError::serialization("table", err)
    }
}

impl From<TransportError> for AdminError {
    fn from(err: TransportError) -> Self {
        AdminError::Dispatch(DispatchError::new(
            DispatchErrorKind::Transport,
            err.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_error_becomes_serialization_error() {
        let err: AdminError = TableError::ColumnCountMismatch {
            expected: 3,
            actual: 2,
        }
        .into();

        assert_eq!(err.status(), 500);
        assert_eq!(
            err.to_string(),
            "failed to serialize table: row has 2 cells but the table has 3 columns"
        );
    }

    #[test]
    fn test_transport_error_becomes_dispatch_error() {
        let err: AdminError = TransportError::Closed("peer reset".to_string()).into();
        assert_eq!(err.dispatch_kind(), Some(DispatchErrorKind::Transport));
        assert_eq!(err.status(), 502);
    }
}
