//! Fluent, validating construction of administrative requests.
//!
//! Responsibilities:
//! - Seed requests with defaults from [`AdminConfig`] (per-operation timeout,
//!   master node timeout, per-operation index policy).
//! - Parse textual time values, leaving the previous value untouched on error.
//! - Collect every validation problem into a single [`AdminError::Validation`].
//!
//! Does NOT handle:
//! - Running the request beyond handing it to a [`Dispatcher`].
//!
//! Invariants:
//! - `build()` copies the builder state; later setter calls never change a
//!   request that was already produced.
//! - Setters are last-write-wins.

use admin_config::AdminConfig;
use std::time::Duration;

use crate::dispatcher::Dispatcher;
use crate::error::{AdminError, Result};
use crate::indices_options::IndicesOptions;
use crate::listener::ResponseListener;
use crate::models::AdminResponse;
use crate::request::{ALL_INDICES, AdminRequest, OperationKind, is_wildcard, targets_all};
use crate::time_value::parse_time_value;

/// Builder for [`AdminRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    kind: OperationKind,
    indices: Vec<String>,
    indices_options: IndicesOptions,
    timeout: Duration,
    master_node_timeout: Duration,
    destructive_requires_name: bool,
}

impl RequestBuilder {
    /// Create a builder for `kind` with defaults from `config`.
    pub fn new(kind: OperationKind, config: &AdminConfig) -> Self {
        Self {
            kind,
            indices: Vec::new(),
            indices_options: kind.default_indices_options(),
            timeout: kind.default_timeout(config),
            master_node_timeout: config.master_node_timeout,
            destructive_requires_name: config.destructive_requires_name,
        }
    }

    /// Builder for deleting the given indices.
    pub fn delete_index<I, S>(indices: I, config: &AdminConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::new(OperationKind::DeleteIndex, config);
        builder.with_indices(indices);
        builder
    }

    /// Builder for a cluster health query scoped to the given indices.
    pub fn cluster_health<I, S>(indices: I, config: &AdminConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::new(OperationKind::ClusterHealth, config);
        builder.with_indices(indices);
        builder
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn master_node_timeout(&self) -> Duration {
        self.master_node_timeout
    }

    pub fn indices_options(&self) -> IndicesOptions {
        self.indices_options
    }

    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    /// Replace the target patterns.
    pub fn with_indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    /// Set how long to wait for the operation to be acknowledged.
    pub fn with_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout from a time value such as `30s`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Parse`] for malformed input; the previous timeout
    /// is kept.
    pub fn with_timeout_str(&mut self, value: &str) -> Result<&mut Self> {
        let timeout = parse_time_value(value, "timeout")?;
        Ok(self.with_timeout(timeout))
    }

    /// Set how long to wait for the coordinating node.
    pub fn with_master_node_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.master_node_timeout = timeout;
        self
    }

    /// Set the master node timeout from a time value such as `30s`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Parse`] for malformed input; the previous value
    /// is kept.
    pub fn with_master_node_timeout_str(&mut self, value: &str) -> Result<&mut Self> {
        let timeout = parse_time_value(value, "master_timeout")?;
        Ok(self.with_master_node_timeout(timeout))
    }

    pub fn with_indices_options(&mut self, options: IndicesOptions) -> &mut Self {
        self.indices_options = options;
        self
    }

    /// Produce an immutable request from the current state.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] listing every problem found.
    pub fn build(&self) -> Result<AdminRequest> {
        let request = AdminRequest::new(
            self.kind,
            self.indices.clone(),
            self.indices_options,
            self.timeout,
            self.master_node_timeout,
        );

        let mut errors = request.validation_errors();
        if self.destructive_requires_name && self.kind.is_destructive() {
            errors.extend(self.explicit_name_errors());
        }

        if errors.is_empty() {
            Ok(request)
        } else {
            Err(AdminError::Validation(errors))
        }
    }

    fn explicit_name_errors(&self) -> Vec<String> {
        if targets_all(&self.indices) {
            return vec![format!(
                "wildcard expressions or all indices are not allowed for [{}]",
                self.kind.action_name()
            )];
        }

        self.indices
            .iter()
            .filter(|pattern| pattern.as_str() == ALL_INDICES || is_wildcard(pattern))
            .map(|pattern| {
                format!(
                    "wildcard expressions or all indices are not allowed, got [{}]",
                    pattern
                )
            })
            .collect()
    }

    /// Build the request and hand it to `dispatcher`.
    ///
    /// A build failure is returned here and nothing is dispatched. Once
    /// dispatched, the outcome is delivered to `listener` exactly once.
    pub fn execute<L>(&self, dispatcher: &Dispatcher, listener: L) -> Result<()>
    where
        L: ResponseListener<AdminResponse>,
    {
        let request = self.build()?;
        dispatcher.execute(request, listener);
        Ok(())
    }
}
