//! Two-outcome completion callbacks for dispatched requests.
//!
//! Responsibilities:
//! - Define the [`ResponseListener`] contract: exactly one of `on_success` or
//!   `on_failure` is called, once.
//! - Adapt closures, oneshot channels and response conversions to it.
//!
//! Does NOT handle:
//! - Recovering failures raised inside an implementation's own `on_success`.
//!   Implementations that can fail there must route into their `on_failure`.
//!
//! Invariants:
//! - Both methods take `self`, so a listener cannot be completed twice.
//! - Listeners may run on any runtime worker thread.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{AdminError, DispatchError, Result};

/// Receives the outcome of an asynchronous operation.
pub trait ResponseListener<T>: Send + 'static {
    /// Called with the response when the operation succeeds.
    fn on_success(self, response: T);

    /// Called with the error when the operation fails.
    fn on_failure(self, error: AdminError);
}

impl<T, F> ResponseListener<T> for F
where
    F: FnOnce(Result<T>) + Send + 'static,
{
    fn on_success(self, response: T) {
        self(Ok(response))
    }

    fn on_failure(self, error: AdminError) {
        self(Err(error))
    }
}

/// Complete a listener from a `Result`.
pub fn complete<T, L>(listener: L, outcome: Result<T>)
where
    L: ResponseListener<T>,
{
    match outcome {
        Ok(response) => listener.on_success(response),
        Err(error) => listener.on_failure(error),
    }
}

/// Listener half of [`oneshot_listener`].
#[derive(Debug)]
pub struct OneshotListener<T> {
    tx: oneshot::Sender<Result<T>>,
}

impl<T: Send + 'static> ResponseListener<T> for OneshotListener<T> {
    fn on_success(self, response: T) {
        // The receiver may have been dropped; nobody is waiting then.
        let _ = self.tx.send(Ok(response));
    }

    fn on_failure(self, error: AdminError) {
        let _ = self.tx.send(Err(error));
    }
}

/// Future half of [`oneshot_listener`].
#[derive(Debug)]
pub struct ResponseFuture<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> Future for ResponseFuture<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|received| {
            received.unwrap_or_else(|_| {
                Err(DispatchError::dispatch_failed(
                    "listener was dropped without a response",
                )
                .into())
            })
        })
    }
}

/// Create a listener whose outcome can be awaited.
///
/// If the listener is dropped without being completed the future resolves to
/// a `dispatch_failed` error.
pub fn oneshot_listener<T>() -> (OneshotListener<T>, ResponseFuture<T>) {
    let (tx, rx) = oneshot::channel();
    (OneshotListener { tx }, ResponseFuture { rx })
}

/// Listener that converts the response before handing it on.
pub struct MappedListener<L, F> {
    inner: L,
    map: F,
}

impl<T, U, L, F> ResponseListener<T> for MappedListener<L, F>
where
    L: ResponseListener<U>,
    F: FnOnce(T) -> Result<U> + Send + 'static,
{
    fn on_success(self, response: T) {
        match (self.map)(response) {
            Ok(mapped) => self.inner.on_success(mapped),
            Err(error) => self.inner.on_failure(error),
        }
    }

    fn on_failure(self, error: AdminError) {
        self.inner.on_failure(error)
    }
}

/// Combinators for [`ResponseListener`].
pub trait ResponseListenerExt<U>: ResponseListener<U> + Sized {
    /// Accept `T` instead of `U`, converting with `map`.
    ///
    /// A conversion error is delivered to this listener's `on_failure`.
    fn map_response<T, F>(self, map: F) -> MappedListener<Self, F>
    where
        F: FnOnce(T) -> Result<U> + Send + 'static,
    {
        MappedListener { inner: self, map }
    }
}

impl<U, L: ResponseListener<U>> ResponseListenerExt<U> for L {}
