//! Metrics collection for administrative dispatches.
//!
//! This module provides metrics collection for dispatched requests, including:
//! - Dispatch counters (total, failures)
//! - Dispatch latency histograms
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see [`crate::metrics_exporter`])
//! - Persistent storage of metrics
//!
//! # Invariants
//! - All metrics use consistent label names: `action`, `outcome`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use std::time::Duration;

use crate::error::AdminError;

/// Metric name for the dispatch counter.
pub const METRIC_DISPATCH_TOTAL: &str = "admin_dispatch_total";

/// Metric name for the dispatch failure counter.
pub const METRIC_DISPATCH_FAILURES: &str = "admin_dispatch_failures_total";

/// Metric name for the dispatch duration histogram.
pub const METRIC_DISPATCH_DURATION: &str = "admin_dispatch_duration_seconds";

/// Final state of a dispatch, for labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success,
    Failure,
}

impl DispatchOutcome {
    /// Returns the string label for this outcome.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Success => "success",
            DispatchOutcome::Failure => "failure",
        }
    }
}

/// Metrics collector for administrative dispatches.
///
/// A lightweight wrapper around the `metrics` crate macros with consistent
/// labels. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    /// Whether metrics collection is enabled.
    enabled: bool,
}

impl MetricsCollector {
    /// Create a new, enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record that a request was handed to the dispatcher.
    pub fn record_dispatch(&self, action: &'static str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_DISPATCH_TOTAL, "action" => action).increment(1);
    }

    /// Record a failed dispatch.
    pub fn record_failure(&self, action: &'static str, error: &AdminError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_DISPATCH_FAILURES,
            "action" => action,
            "error_category" => error.category(),
        )
        .increment(1);
    }

    /// Record how long a dispatch took from hand-off to listener completion.
    pub fn record_duration(
        &self,
        action: &'static str,
        duration: Duration,
        outcome: DispatchOutcome,
    ) {
        if !self.enabled {
            return;
        }

        metrics::histogram!(METRIC_DISPATCH_DURATION,
            "action" => action,
            "outcome" => outcome.as_str(),
        )
        .record(duration.as_secs_f64());
    }
}
