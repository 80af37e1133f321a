//! Asynchronous request dispatch.
//!
//! Responsibilities:
//! - Hand each request to a [`ClusterCoordinator`] on its own runtime task.
//! - Deliver exactly one outcome per request to its [`ResponseListener`].
//! - Track in-flight work so callers can shut down and drain.
//!
//! Does NOT handle:
//! - Ordering between independent dispatches.
//! - Rendering outcomes for a transport (see the REST crate).
//!
//! Invariants:
//! - `execute` returns as soon as the task is spawned; the caller never waits
//!   for the outcome.
//! - The listener is owned by a [`CompletionGuard`]. A coordinator panic, a
//!   shutdown or a dropped task still completes it, with `dispatch_failed`.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::coordinator::{ClusterCoordinator, run_request};
use crate::error::{AdminError, DispatchError, Result};
use crate::listener::{ResponseListener, complete};
use crate::metrics::{DispatchOutcome, MetricsCollector};
use crate::models::AdminResponse;
use crate::request::AdminRequest;

const SHUTTING_DOWN: &str = "node is shutting down";

/// Runs administrative requests against a coordinator.
///
/// Cloning is cheap; clones share the coordinator, the task tracker and the
/// shutdown signal.
#[derive(Clone)]
pub struct Dispatcher {
    coordinator: Arc<dyn ClusterCoordinator>,
    handle: Handle,
    tracker: TaskTracker,
    shutdown: CancellationToken,
    metrics: MetricsCollector,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("in_flight", &self.tracker.len())
            .field("shut_down", &self.shutdown.is_cancelled())
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher bound to the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn new(coordinator: Arc<dyn ClusterCoordinator>) -> Self {
        Self::with_handle(coordinator, Handle::current())
    }

    /// Create a dispatcher that spawns onto `handle`.
    pub fn with_handle(coordinator: Arc<dyn ClusterCoordinator>, handle: Handle) -> Self {
        Self {
            coordinator,
            handle,
            tracker: TaskTracker::new(),
            shutdown: CancellationToken::new(),
            metrics: MetricsCollector::disabled(),
        }
    }

    /// Record dispatch metrics through `metrics`.
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    /// Number of dispatches still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Run `request` in the background and report its outcome to `listener`.
    ///
    /// Validation failures, coordinator errors, panics and shutdown all reach
    /// `listener.on_failure`; nothing is returned to the caller.
    pub fn execute<L>(&self, request: AdminRequest, listener: L)
    where
        L: ResponseListener<AdminResponse>,
    {
        let action = request.kind().action_name();
        let dispatch_id = Uuid::new_v4();
        self.metrics.record_dispatch(action);

        let guard = CompletionGuard::new(listener, action, self.metrics.clone());
        let coordinator = Arc::clone(&self.coordinator);
        let shutdown = self.shutdown.clone();

        let span = info_span!(
            "admin.dispatch",
            action = action,
            dispatch_id = %dispatch_id,
            duration_ms = tracing::field::Empty,
        );

        self.tracker.spawn_on(
            async move {
                let start = Instant::now();
                tracing::debug!(indices = ?request.indices(), "Dispatching request");

                let outcome = run_guarded(coordinator, &request, &shutdown).await;

                let duration = start.elapsed().as_millis() as i64;
                tracing::Span::current().record("duration_ms", duration);
                guard.complete(outcome);
            }
            .instrument(span),
            &self.handle,
        );
    }

    /// Fail new and in-flight dispatches with `dispatch_failed`.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            tracing::info!(in_flight = self.tracker.len(), "Shutting down dispatcher");
        }
        self.shutdown.cancel();
        let _ = self.tracker.close();
    }

    /// Wait until every spawned dispatch has completed its listener.
    pub async fn wait_idle(&self) {
        let reopen = !self.tracker.is_closed();
        let _ = self.tracker.close();
        self.tracker.wait().await;
        if reopen && !self.shutdown.is_cancelled() {
            let _ = self.tracker.reopen();
        }
    }
}

async fn run_guarded(
    coordinator: Arc<dyn ClusterCoordinator>,
    request: &AdminRequest,
    shutdown: &CancellationToken,
) -> Result<AdminResponse> {
    if shutdown.is_cancelled() {
        return Err(DispatchError::dispatch_failed(SHUTTING_DOWN).into());
    }
    request.validate()?;

    let work = AssertUnwindSafe(run_request(coordinator.as_ref(), request)).catch_unwind();
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => Err(DispatchError::dispatch_failed(SHUTTING_DOWN).into()),
        result = work => match result {
            Ok(response) => response.map_err(AdminError::from),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(panic = %message, "Coordinator panicked");
                Err(DispatchError::dispatch_failed(format!("coordinator panicked: {}", message)).into())
            }
        },
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Owns a listener until an outcome is delivered.
///
/// Dropping the guard without calling [`CompletionGuard::complete`] fails the
/// listener with `dispatch_failed`.
struct CompletionGuard<L: ResponseListener<AdminResponse>> {
    listener: Option<L>,
    action: &'static str,
    metrics: MetricsCollector,
    started: Instant,
}

impl<L: ResponseListener<AdminResponse>> CompletionGuard<L> {
    fn new(listener: L, action: &'static str, metrics: MetricsCollector) -> Self {
        Self {
            listener: Some(listener),
            action,
            metrics,
            started: Instant::now(),
        }
    }

    fn complete(mut self, outcome: Result<AdminResponse>) {
        if let Some(listener) = self.listener.take() {
            self.deliver(listener, outcome);
        }
    }

    fn deliver(&self, listener: L, outcome: Result<AdminResponse>) {
        let elapsed = self.started.elapsed();
        match &outcome {
            Ok(_) => {
                tracing::debug!("Dispatch completed");
                self.metrics
                    .record_duration(self.action, elapsed, DispatchOutcome::Success);
            }
            Err(error) => {
                tracing::warn!(error = %error, "Dispatch failed");
                self.metrics.record_failure(self.action, error);
                self.metrics
                    .record_duration(self.action, elapsed, DispatchOutcome::Failure);
            }
        }
        complete(listener, outcome);
    }
}

impl<L: ResponseListener<AdminResponse>> Drop for CompletionGuard<L> {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.deliver(
                listener,
                Err(DispatchError::dispatch_failed("dispatch task was dropped before completion")
                    .into()),
            );
        }
    }
}
