//! Consumer adapter boundary
//!
//! The engine renders nothing. A list presenter supplies gesture streams
//! (pull-to-refresh, reached-bottom) and a page loader, and receives the
//! accumulated item list after every published state. Consumers must route
//! all container mutation through update events; mutating rendered items
//! out of band breaks the engine's state invariants.

use crate::config::{PageLoader, PagerConfig};
use crate::engine::page;
use crate::error::Result;
use crate::event::Event;
use futures::{Stream, StreamExt};

/// One fetched unit of data that can be merged into an item list
pub trait ItemPage: Send {
    /// The rendered item type
    type Item: Clone + Send;

    /// Items carried by this page
    fn items(&self) -> Vec<Self::Item>;
}

/// Map gesture streams into engine events and yield the accumulated item
/// list after every page.
///
/// An initial reload is seeded ahead of the gesture streams, so the first
/// page loads without an explicit pull-to-refresh. Pull-to-refresh maps to
/// [`Event::Reload`], reached-bottom to [`Event::NextPage`].
pub fn paged_items<P, L, R, N, H>(
    reload: R,
    next_page: N,
    loader: L,
    has_next: H,
) -> impl Stream<Item = Result<Vec<P::Item>>>
where
    P: ItemPage + Clone + Send + Sync + 'static,
    P::Item: Sync + 'static,
    L: PageLoader<Vec<P::Item>, P> + 'static,
    R: Stream<Item = ()> + Send + 'static,
    N: Stream<Item = ()> + Send + 'static,
    H: Fn(&Vec<P::Item>, &P) -> bool + Send + Sync + 'static,
{
    let gestures = futures::stream::select(
        reload.map(|()| Event::Reload),
        next_page.map(|()| Event::NextPage),
    );
    let events = futures::stream::iter([Event::Reload]).chain(gestures);

    let config = PagerConfig::new(
        Vec::new,
        |mut container: Vec<P::Item>, fetched: P| {
            container.extend(fetched.items());
            container
        },
        has_next,
        loader,
    );

    page(config, events).map(|result| result.map(|response| response.container))
}
