//! Fetch-everything coordination
//!
//! Wraps a paging engine with a next-page feedback loop: after every
//! response that still has pages remaining, a next-page event is injected
//! back into the engine's input, so a single reload drains the source one
//! page at a time. The stream ends with the first exhausted response.

use crate::config::PagerConfig;
use crate::engine::{page, Response, ResponseStream};
use crate::error::Result;
use crate::event::{event_channel, Event, EventSender};
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

pin_project! {
    /// Response stream that drives itself to exhaustion.
    ///
    /// Same contract as [`ResponseStream`], except next-page events are
    /// synthesized internally and delivery stops (inclusively) at the first
    /// response with `has_next == false`.
    pub struct AllPagesStream<C> {
        #[pin]
        inner: ResponseStream<C>,
        feedback: EventSender<C>,
        done: bool,
    }
}

/// Load and accumulate pages until the has-next predicate says otherwise.
///
/// Callers still supply the event stream that starts things off, typically
/// a single [`Event::Reload`]; every subsequent page is requested by the
/// coordinator itself, one response per page.
pub fn all_pages<C, P, S>(config: PagerConfig<C, P>, events: S) -> AllPagesStream<C>
where
    C: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    S: Stream<Item = Event<C>> + Send + 'static,
{
    let (feedback, injected) = event_channel::<C>();
    let merged = futures::stream::select(events, injected);
    AllPagesStream {
        inner: page(config, merged),
        feedback,
        done: false,
    }
}

impl<C> Stream for AllPagesStream<C> {
    type Item = Result<Response<C>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }
        match this.inner.poll_next(cx) {
            Poll::Ready(Some(Ok(response))) => {
                if response.has_next {
                    debug!("requesting next page");
                    this.feedback.next_page();
                } else {
                    *this.done = true;
                }
                Poll::Ready(Some(Ok(response)))
            }
            Poll::Ready(Some(Err(error))) => {
                *this.done = true;
                Poll::Ready(Some(Err(error)))
            }
            other => other,
        }
    }
}
