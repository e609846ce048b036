//! Paging engine
//!
//! # Overview
//!
//! The engine serializes heterogeneous control events against a single
//! asynchronous page source. It owns one state cell and processes events in
//! a single task, so at most one event is in active processing and at most
//! one fetch is outstanding at any time. Concretely:
//!
//! - Reload and update events are always eligible. Next-page events are
//!   dropped once no more pages remain, and also when they arrive while a
//!   fetch is in flight, so bursts of reached-bottom triggers collapse
//!   into one outstanding fetch.
//! - Everything else that arrives during a fetch queues FIFO behind it, as
//!   do events the source had already delivered when the fetch began; a
//!   response is committed before the following event is processed. A
//!   common case is the user reloading the list and, while the old list is
//!   still visible, scrolling to the bottom and requesting another page.
//! - Silent updates commit state without publishing a response.
//! - A loader failure terminates the response stream with that error.

mod types;

pub use types::{Response, ResponseStream};
pub(crate) use types::State;

use crate::config::PagerConfig;
use crate::error::Result;
use crate::event::{Event, EventKind};
use futures::stream::Fuse;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::Poll;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default capacity of the response channel; a slow consumer backpressures
/// the engine once this many responses are unread
const DEFAULT_BUFFER: usize = 16;

/// Serialized pagination state machine.
///
/// Construct with a [`PagerConfig`] and drive it with an event stream via
/// [`responses`](Self::responses). The free function [`page`] is a one-call
/// shorthand.
pub struct PagingEngine<C, P> {
    config: PagerConfig<C, P>,
    buffer: usize,
}

impl<C, P> PagingEngine<C, P>
where
    C: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
{
    /// Create an engine from a pager configuration
    pub fn new(config: PagerConfig<C, P>) -> Self {
        Self {
            config,
            buffer: DEFAULT_BUFFER,
        }
    }

    /// Set the response channel capacity
    #[must_use]
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer.max(1);
        self
    }

    /// Consume events and produce responses.
    ///
    /// The processing loop runs on a spawned task; dropping the returned
    /// stream aborts it, cancelling any in-flight fetch.
    pub fn responses<S>(self, events: S) -> ResponseStream<C>
    where
        S: Stream<Item = Event<C>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.buffer);
        let task = tokio::spawn(run(self.config, events, tx));
        ResponseStream::new(rx, task)
    }
}

/// Drive a paging engine over `events`, producing responses in event order
pub fn page<C, P, S>(config: PagerConfig<C, P>, events: S) -> ResponseStream<C>
where
    C: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    S: Stream<Item = Event<C>> + Send + 'static,
{
    PagingEngine::new(config).responses(events)
}

/// The serialized processing loop: one state cell, one event at a time
async fn run<C, P, S>(
    config: PagerConfig<C, P>,
    events: S,
    tx: mpsc::Sender<Result<Response<C>>>,
) where
    C: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    S: Stream<Item = Event<C>> + Send + 'static,
{
    let mut events = Box::pin(events.fuse());
    let mut state: State<C, P> = State::initial(config.make_container());
    let mut queue: VecDeque<Event<C>> = VecDeque::new();
    let mut input_done = false;

    loop {
        // Events deferred during a fetch run before new input.
        let event = match queue.pop_front() {
            Some(event) => event,
            None if input_done => break,
            None => match events.next().await {
                Some(event) => event,
                None => break,
            },
        };

        // Eligibility: a next-page request is meaningful only while more
        // pages remain. The engine is idle here, so the in-flight half of
        // the check lives in `fetch_page`.
        let kind = event.kind();
        if kind == EventKind::NextPage && !state.has_next {
            debug!("dropping next_page event, no more pages");
            continue;
        }

        match event {
            Event::Update(transform) | Event::UpdateSilent(transform) => {
                let State {
                    container,
                    last_page,
                    has_next,
                    ..
                } = state;
                state = State {
                    container: transform(container),
                    last_page,
                    has_next,
                    event: Some(kind),
                };
            }
            Event::Reload | Event::NextPage => {
                let (container, last_page) = if kind == EventKind::Reload {
                    (config.make_container(), None)
                } else {
                    (state.container.clone(), state.last_page.clone())
                };

                // Events the source has already delivered arrived before
                // this fetch starts; defer them in arrival order rather
                // than treating them as in-flight arrivals.
                while !input_done {
                    match futures::poll!(events.next()) {
                        Poll::Ready(Some(event)) => queue.push_back(event),
                        Poll::Ready(None) => input_done = true,
                        Poll::Pending => break,
                    }
                }

                debug!(event = ?kind, "starting page fetch");
                let fetched = fetch_page(
                    &config,
                    &container,
                    last_page.as_ref(),
                    &mut events,
                    &mut queue,
                    &mut input_done,
                )
                .await;

                match fetched {
                    Ok(fetched_page) => {
                        let has_next = config.has_next(&container, &fetched_page);
                        debug!(has_next, "page fetch committed");
                        state = State {
                            container: config.accumulate(container, fetched_page.clone()),
                            last_page: Some(fetched_page),
                            has_next,
                            event: Some(kind),
                        };
                    }
                    Err(error) => {
                        // Terminal: the pre-fetch state is never committed
                        // and no further responses are produced.
                        warn!(%error, "page fetch failed, ending response stream");
                        let _ = tx.send(Err(error)).await;
                        return;
                    }
                }
            }
        }

        if kind.propagates() && tx.send(Ok(state.response())).await.is_err() {
            // Consumer is gone.
            return;
        }
    }
}

/// Run one fetch while concurrently draining the event input.
///
/// Next-page events arriving mid-fetch are dropped (the in-flight guard);
/// everything else is deferred so it processes against the committed state.
async fn fetch_page<C, P, S>(
    config: &PagerConfig<C, P>,
    container: &C,
    last_page: Option<&P>,
    events: &mut Pin<Box<Fuse<S>>>,
    queue: &mut VecDeque<Event<C>>,
    input_done: &mut bool,
) -> Result<P>
where
    C: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    S: Stream<Item = Event<C>> + Send + 'static,
{
    let load = config.load_page(container, last_page);
    tokio::pin!(load);

    loop {
        tokio::select! {
            // Drain input ahead of the fetch result so events sent while
            // the fetch was pending are classified as in-flight arrivals.
            biased;
            event = events.next(), if !*input_done => match event {
                Some(Event::NextPage) => {
                    debug!("dropping next_page event, fetch in flight");
                }
                Some(event) => queue.push_back(event),
                None => *input_done = true,
            },
            fetched = &mut load => return fetched,
        }
    }
}

#[cfg(test)]
mod tests;
