//! Engine state and response types

use crate::error::Result;
use crate::event::EventKind;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The engine's private snapshot of pagination progress.
///
/// Owned exclusively by the engine task and mutated only by its transition
/// function; it leaves the engine only as the [`Response`] projection.
#[derive(Debug, Clone)]
pub(crate) struct State<C, P> {
    /// Accumulated container
    pub(crate) container: C,
    /// Last successfully fetched page, cleared by reload
    pub(crate) last_page: Option<P>,
    /// Whether more pages remain; true until the first fetch says otherwise
    pub(crate) has_next: bool,
    /// Kind of the event that produced this state
    pub(crate) event: Option<EventKind>,
}

impl<C: Clone, P> State<C, P> {
    /// State at engine construction
    pub(crate) fn initial(container: C) -> Self {
        Self {
            container,
            last_page: None,
            has_next: true,
            event: None,
        }
    }

    /// Project the externally visible part of this state
    pub(crate) fn response(&self) -> Response<C> {
        Response {
            container: self.container.clone(),
            has_next: self.has_next,
        }
    }
}

/// The externally visible projection of engine state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<C> {
    /// Accumulated container after the originating event
    pub container: C,
    /// Whether more pages remain
    pub has_next: bool,
}

impl<C> Response<C> {
    /// Create a response
    pub fn new(container: C, has_next: bool) -> Self {
        Self {
            container,
            has_next,
        }
    }
}

impl<T> Response<Vec<T>> {
    /// Empty, exhausted response
    pub fn none() -> Self {
        Self {
            container: Vec::new(),
            has_next: false,
        }
    }
}

/// Stream of responses produced by a paging engine.
///
/// Responses arrive in the order their originating events were processed.
/// The stream completes when the event input completes, or terminates with
/// the loader's error if a fetch fails. Dropping the stream cancels the
/// engine: the processing task is aborted, which drops any in-flight
/// `load_page` future.
pub struct ResponseStream<C> {
    rx: mpsc::Receiver<Result<Response<C>>>,
    task: JoinHandle<()>,
}

impl<C> ResponseStream<C> {
    pub(crate) fn new(rx: mpsc::Receiver<Result<Response<C>>>, task: JoinHandle<()>) -> Self {
        Self { rx, task }
    }

    /// Cancel the engine without waiting for in-flight work
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl<C> Stream for ResponseStream<C> {
    type Item = Result<Response<C>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl<C> Drop for ResponseStream<C> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
