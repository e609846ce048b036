//! Pager configuration
//!
//! The engine is parameterized by four caller-supplied pieces: a factory
//! for the empty container, an accumulator merging a fetched page into the
//! container, a predicate deciding whether more pages remain, and the
//! asynchronous [`PageLoader`] that actually fetches pages. `Page` and
//! `Container` are independent generic types; in the common case both are
//! the same list type, e.g. `Vec<SomeModel>`.

use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Asynchronous page source.
///
/// Given the accumulated container and the last successfully fetched page
/// (none before the first fetch and after every reload), produce the next
/// page or fail. This is the engine's only suspension point; the engine
/// never issues more than one `load_page` call at a time.
#[async_trait]
pub trait PageLoader<C, P>: Send + Sync {
    /// Fetch the next page
    async fn load_page(&self, container: &C, last_page: Option<&P>) -> Result<P>;
}

/// Adapter turning an async closure into a [`PageLoader`].
///
/// The closure receives owned copies of the container and last page, which
/// keeps its signature free of higher-ranked lifetimes.
pub struct FnLoader<F> {
    f: F,
}

/// Create a [`PageLoader`] from an async closure
pub fn loader_fn<C, P, F, Fut>(f: F) -> FnLoader<F>
where
    F: Fn(C, Option<P>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<P>> + Send,
{
    FnLoader { f }
}

#[async_trait]
impl<C, P, F, Fut> PageLoader<C, P> for FnLoader<F>
where
    C: Clone + Send + Sync,
    P: Clone + Send + Sync,
    F: Fn(C, Option<P>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<P>> + Send,
{
    async fn load_page(&self, container: &C, last_page: Option<&P>) -> Result<P> {
        (self.f)(container.clone(), last_page.cloned()).await
    }
}

type MakeFn<C> = Arc<dyn Fn() -> C + Send + Sync>;
type AccumulateFn<C, P> = Arc<dyn Fn(C, P) -> C + Send + Sync>;
type HasNextFn<C, P> = Arc<dyn Fn(&C, &P) -> bool + Send + Sync>;

/// Immutable bundle of the four functions parameterizing an engine.
///
/// The functions must be pure with respect to engine state; only the loader
/// may perform I/O. The engine calls them one at a time.
pub struct PagerConfig<C, P> {
    make_container: MakeFn<C>,
    accumulate: AccumulateFn<C, P>,
    has_next: HasNextFn<C, P>,
    loader: Arc<dyn PageLoader<C, P>>,
}

impl<C, P> PagerConfig<C, P> {
    /// Bundle the pager functions.
    ///
    /// - `make_container`: the empty accumulated value, used at startup and
    ///   on every reload
    /// - `accumulate`: merge a fetched page into the container
    /// - `has_next`: decide whether more pages remain, given the container
    ///   the page was fetched against and the page itself
    /// - `loader`: the asynchronous page source
    pub fn new(
        make_container: impl Fn() -> C + Send + Sync + 'static,
        accumulate: impl Fn(C, P) -> C + Send + Sync + 'static,
        has_next: impl Fn(&C, &P) -> bool + Send + Sync + 'static,
        loader: impl PageLoader<C, P> + 'static,
    ) -> Self {
        Self {
            make_container: Arc::new(make_container),
            accumulate: Arc::new(accumulate),
            has_next: Arc::new(has_next),
            loader: Arc::new(loader),
        }
    }

    /// Produce the empty container
    pub(crate) fn make_container(&self) -> C {
        (self.make_container)()
    }

    /// Merge a page into the container
    pub(crate) fn accumulate(&self, container: C, page: P) -> C {
        (self.accumulate)(container, page)
    }

    /// Decide whether more pages remain after `page` was fetched against
    /// `container`
    pub(crate) fn has_next(&self, container: &C, page: &P) -> bool {
        (self.has_next)(container, page)
    }

    /// Invoke the loader
    pub(crate) async fn load_page(&self, container: &C, last_page: Option<&P>) -> Result<P> {
        self.loader.load_page(container, last_page).await
    }
}

impl<C, P> Clone for PagerConfig<C, P> {
    fn clone(&self) -> Self {
        Self {
            make_container: Arc::clone(&self.make_container),
            accumulate: Arc::clone(&self.accumulate),
            has_next: Arc::clone(&self.has_next),
            loader: Arc::clone(&self.loader),
        }
    }
}
