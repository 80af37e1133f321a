//! Administrative request model.
//!
//! Responsibilities:
//! - Describe one administrative operation and its options as an immutable value.
//! - Carry the per-operation defaults (action name, destructiveness, index policy).
//! - Re-check intrinsic consistency before a request is handed to a coordinator.
//!
//! Does NOT handle:
//! - Configuration-dependent rules such as `destructive_requires_name`
//!   (see [`crate::builder::RequestBuilder`]).
//! - Execution (see [`crate::dispatcher::Dispatcher`]).

use admin_config::AdminConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{AdminError, Result};
use crate::indices_options::IndicesOptions;

/// Selector that targets every index.
pub const ALL_INDICES: &str = "_all";

/// The administrative operations this pipeline knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    DeleteIndex,
    ClusterHealth,
}

impl OperationKind {
    /// Transport action name used in logs and metrics.
    pub const fn action_name(&self) -> &'static str {
        match self {
            OperationKind::DeleteIndex => "indices:admin/delete",
            OperationKind::ClusterHealth => "cluster:monitor/health",
        }
    }

    /// Whether the operation removes or mutates cluster state.
    pub const fn is_destructive(&self) -> bool {
        matches!(self, OperationKind::DeleteIndex)
    }

    /// Index policy applied when the caller does not set one.
    pub fn default_indices_options(&self) -> IndicesOptions {
        match self {
            OperationKind::DeleteIndex => IndicesOptions::strict_expand_open_closed(),
            OperationKind::ClusterHealth => IndicesOptions::lenient_expand_open(),
        }
    }

    /// Timeout applied when the caller does not set one.
    pub fn default_timeout(&self, config: &AdminConfig) -> Duration {
        config.timeouts.for_operation(self.is_destructive())
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

/// A single administrative operation, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRequest {
    kind: OperationKind,
    indices: Vec<String>,
    indices_options: IndicesOptions,
    timeout: Duration,
    master_node_timeout: Duration,
}

impl AdminRequest {
    /// Create a request without validating it.
    ///
    /// Most callers should go through [`crate::builder::RequestBuilder`], which
    /// applies configuration defaults and rejects inconsistent input up front.
    /// Requests created here are validated again when dispatched.
    pub fn new(
        kind: OperationKind,
        indices: Vec<String>,
        indices_options: IndicesOptions,
        timeout: Duration,
        master_node_timeout: Duration,
    ) -> Self {
        Self {
            kind,
            indices,
            indices_options,
            timeout,
            master_node_timeout,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Target patterns in caller order. Empty means every index.
    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    pub fn indices_options(&self) -> IndicesOptions {
        self.indices_options
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn master_node_timeout(&self) -> Duration {
        self.master_node_timeout
    }

    /// Whether the selector targets every index (empty, or `_all` alone).
    pub fn targets_all(&self) -> bool {
        targets_all(&self.indices)
    }

    /// Collect every intrinsic problem with this request.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.timeout.is_zero() {
            errors.push("timeout must be positive".to_string());
        }
        if self.master_node_timeout.is_zero() {
            errors.push("master node timeout must be positive".to_string());
        }
        if let Err(mut option_errors) = self.indices_options.validate() {
            errors.append(&mut option_errors);
        }
        for (position, pattern) in self.indices.iter().enumerate() {
            if pattern.trim().is_empty() {
                errors.push(format!("index pattern at position {} must not be blank", position));
            }
        }

        errors
    }

    /// Fail with [`AdminError::Validation`] listing every problem.
    pub fn validate(&self) -> Result<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AdminError::Validation(errors))
        }
    }
}

/// Whether `patterns` selects every index.
pub fn targets_all(patterns: &[String]) -> bool {
    patterns.is_empty() || (patterns.len() == 1 && patterns[0] == ALL_INDICES)
}

/// Whether `pattern` contains a wildcard.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains('*')
}
