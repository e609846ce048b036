//! Control events driving the paging engine
//!
//! # Overview
//!
//! The engine consumes a stream of [`Event`]s. Reload and next-page events
//! trigger an asynchronous page fetch; update events mutate the accumulated
//! container synchronously. [`event_channel`] provides a push-based source
//! for wiring UI triggers (pull-to-refresh, reached-bottom) into an engine.

mod types;

pub use types::{Event, EventKind, UpdateFn};

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Create a push-based event source.
///
/// The returned sender can be cloned and used from any number of concurrent
/// triggers; the stream delivers events in send order. Dropping every sender
/// completes the stream, which in turn completes the engine consuming it.
pub fn event_channel<C>() -> (EventSender<C>, EventStream<C>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventStream { rx })
}

/// Sending half of an event channel
pub struct EventSender<C> {
    tx: mpsc::UnboundedSender<Event<C>>,
}

impl<C> EventSender<C> {
    /// Send an event; returns false if the stream side is gone
    pub fn send(&self, event: Event<C>) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Send a reload event
    pub fn reload(&self) -> bool {
        self.send(Event::Reload)
    }

    /// Send a next-page event
    pub fn next_page(&self) -> bool {
        self.send(Event::NextPage)
    }

    /// Send an update event; the transformed container is published
    pub fn update(&self, transform: impl FnOnce(C) -> C + Send + 'static) -> bool {
        self.send(Event::update(transform))
    }

    /// Send a silent update event; the transformed container persists
    /// internally without being published
    pub fn update_silent(&self, transform: impl FnOnce(C) -> C + Send + 'static) -> bool {
        self.send(Event::update_silent(transform))
    }
}

impl<C> Clone for EventSender<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Receiving half of an event channel
pub struct EventStream<C> {
    rx: mpsc::UnboundedReceiver<Event<C>>,
}

impl<C> Stream for EventStream<C> {
    type Item = Event<C>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
