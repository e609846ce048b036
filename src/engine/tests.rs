//! Tests for the paging engine

use super::*;
use crate::config::PageLoader;
use crate::error::Error;
use crate::event::event_channel;
use async_trait::async_trait;
use futures::stream;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use test_case::test_case;
use tokio::sync::Notify;

type Container = Vec<i32>;
type Page = Vec<i32>;

// ============================================================================
// Test Loaders
// ============================================================================

/// Always returns the same page
struct StaticLoader {
    page: Page,
}

#[async_trait]
impl PageLoader<Container, Page> for StaticLoader {
    async fn load_page(&self, _container: &Container, _last: Option<&Page>) -> Result<Page> {
        Ok(self.page.clone())
    }
}

/// Returns `[n]` where n continues from the last fetched page
struct SequenceLoader;

#[async_trait]
impl PageLoader<Container, Page> for SequenceLoader {
    async fn load_page(&self, _container: &Container, last: Option<&Page>) -> Result<Page> {
        Ok(vec![last.map_or(1, |page| page[0] + 1)])
    }
}

/// Always fails
struct FailingLoader;

#[async_trait]
impl PageLoader<Container, Page> for FailingLoader {
    async fn load_page(&self, _container: &Container, _last: Option<&Page>) -> Result<Page> {
        Err(Error::fetch("network down"))
    }
}

/// Blocks until `gate` is notified, signalling `entered` on each call
struct GatedLoader {
    page: Page,
    entered: Arc<Notify>,
    gate: Arc<Notify>,
}

#[async_trait]
impl PageLoader<Container, Page> for GatedLoader {
    async fn load_page(&self, _container: &Container, _last: Option<&Page>) -> Result<Page> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(self.page.clone())
    }
}

/// Never completes; sets `cancelled` when its future is dropped
struct PendingLoader {
    started: Arc<Notify>,
    cancelled: Arc<AtomicBool>,
}

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageLoader<Container, Page> for PendingLoader {
    async fn load_page(&self, _container: &Container, _last: Option<&Page>) -> Result<Page> {
        let _guard = SetOnDrop(self.cancelled.clone());
        self.started.notify_one();
        futures::future::pending::<()>().await;
        unreachable!("pending loader never completes")
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn ints_config(
    loader: impl PageLoader<Container, Page> + 'static,
    has_next: impl Fn(&Container, &Page) -> bool + Send + Sync + 'static,
) -> PagerConfig<Container, Page> {
    PagerConfig::new(
        Vec::new,
        |mut container: Container, page: Page| {
            container.extend(page);
            container
        },
        has_next,
        loader,
    )
}

async fn collect_ok(stream: ResponseStream<Container>) -> Vec<Response<Container>> {
    stream
        .map(|result| result.expect("unexpected fetch error"))
        .collect()
        .await
}

// ============================================================================
// Transition Tests
// ============================================================================

#[tokio::test]
async fn test_no_events_produces_no_responses() {
    let config = ints_config(StaticLoader { page: vec![1, 2, 3, 4, 5] }, |_, _| false);
    let responses = collect_ok(page(config, stream::iter(Vec::<Event<Container>>::new()))).await;
    assert_eq!(responses, vec![]);
}

#[tokio::test]
async fn test_single_next_page_exhausts() {
    let config = ints_config(StaticLoader { page: vec![1, 2, 3, 4, 5] }, |_, _| false);
    let responses = collect_ok(page(config, stream::iter(vec![Event::NextPage]))).await;
    assert_eq!(responses, vec![Response::new(vec![1, 2, 3, 4, 5], false)]);
}

#[test_case(2; "redundant second event dropped")]
#[test_case(5; "burst collapses to one fetch")]
#[tokio::test]
async fn test_next_page_after_exhaustion_is_dropped(sent: usize) {
    let config = ints_config(StaticLoader { page: vec![1, 2, 3, 4, 5] }, |_, _| false);
    let events: Vec<Event<Container>> = (0..sent).map(|_| Event::NextPage).collect();
    let responses = collect_ok(page(config, stream::iter(events))).await;
    assert_eq!(responses, vec![Response::new(vec![1, 2, 3, 4, 5], false)]);
}

#[tokio::test]
async fn test_two_pages_until_exhaustion() {
    let config = ints_config(
        StaticLoader { page: vec![1, 2, 3, 4, 5] },
        |container, _| container.len() < 5,
    );
    let events = vec![Event::NextPage, Event::NextPage];
    let responses = collect_ok(page(config, stream::iter(events))).await;
    assert_eq!(
        responses,
        vec![
            Response::new(vec![1, 2, 3, 4, 5], true),
            Response::new(vec![1, 2, 3, 4, 5, 1, 2, 3, 4, 5], false),
        ]
    );
}

#[tokio::test]
async fn test_update_republishes_after_exhaustion() {
    let config = ints_config(StaticLoader { page: vec![1, 2, 3, 4, 5] }, |_, _| false);
    let events = vec![Event::NextPage, Event::update(|container| container)];
    let responses = collect_ok(page(config, stream::iter(events))).await;
    assert_eq!(
        responses,
        vec![
            Response::new(vec![1, 2, 3, 4, 5], false),
            Response::new(vec![1, 2, 3, 4, 5], false),
        ]
    );
}

#[tokio::test]
async fn test_silent_update_persists_without_publishing() {
    let config = ints_config(StaticLoader { page: vec![1, 2, 3, 4, 5] }, |_, _| false);
    let events = vec![
        Event::NextPage,
        Event::update_silent(|_| vec![1, 2, 3]),
        Event::update(|container| container),
    ];
    let responses = collect_ok(page(config, stream::iter(events))).await;
    // The silent step is invisible, but its container mutation is retained
    // and surfaces through the following update.
    assert_eq!(
        responses,
        vec![
            Response::new(vec![1, 2, 3, 4, 5], false),
            Response::new(vec![1, 2, 3], false),
        ]
    );
}

#[tokio::test]
async fn test_reload_resets_container_and_last_page() {
    let config = ints_config(SequenceLoader, |_, _| true);
    let events = vec![
        Event::NextPage,
        Event::NextPage,
        Event::Reload,
        Event::NextPage,
    ];
    let responses = collect_ok(page(config, stream::iter(events))).await;
    assert_eq!(
        responses,
        vec![
            Response::new(vec![1], true),
            Response::new(vec![1, 2], true),
            Response::new(vec![1], true),
            Response::new(vec![1, 2], true),
        ]
    );
}

#[tokio::test]
async fn test_update_before_any_fetch_applies_to_empty_container() {
    let config = ints_config(StaticLoader { page: vec![1] }, |_, _| false);
    let events = vec![Event::<Container>::update(|mut container| {
        container.push(9);
        container
    })];
    let responses = collect_ok(page(config, stream::iter(events))).await;
    // No fetch has happened yet, so has_next is still the initial true.
    assert_eq!(responses, vec![Response::new(vec![9], true)]);
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_failure_is_terminal() {
    let config = ints_config(FailingLoader, |_, _| true);
    let events = vec![Event::NextPage, Event::NextPage];
    let results: Vec<_> = page(config, stream::iter(events)).collect().await;

    assert_eq!(results.len(), 1);
    let error = results.into_iter().next().unwrap().unwrap_err();
    assert_eq!(error.to_string(), "Page fetch failed: network down");
}

// ============================================================================
// In-Flight Guard Tests
// ============================================================================

#[tokio::test]
async fn test_next_page_dropped_while_fetch_in_flight() {
    let entered = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let config = ints_config(
        GatedLoader {
            page: vec![1, 2, 3, 4, 5],
            entered: entered.clone(),
            gate: gate.clone(),
        },
        |container, _| container.is_empty(),
    );

    let (tx, events) = event_channel::<Container>();
    let stream = page(config, events);

    // Reload starts a fetch; the next-page burst arrives while it is in
    // flight and must be dropped, not queued.
    tx.reload();
    entered.notified().await;
    tx.next_page();
    tx.next_page();
    gate.notify_one();
    drop(tx);

    let responses = collect_ok(stream).await;
    assert_eq!(responses, vec![Response::new(vec![1, 2, 3, 4, 5], true)]);
}

#[tokio::test]
async fn test_reload_during_fetch_is_deferred_not_dropped() {
    let entered = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let config = ints_config(
        GatedLoader {
            page: vec![1],
            entered: entered.clone(),
            gate: gate.clone(),
        },
        |_, _| true,
    );

    let (tx, events) = event_channel::<Container>();
    let stream = page(config, events);

    tx.next_page();
    entered.notified().await;
    tx.reload();
    gate.notify_one();
    drop(tx);

    // Second fetch belongs to the deferred reload.
    entered.notified().await;
    gate.notify_one();

    let responses = collect_ok(stream).await;
    assert_eq!(
        responses,
        vec![Response::new(vec![1], true), Response::new(vec![1], true)]
    );
}

// ============================================================================
// Cancellation Tests
// ============================================================================

#[tokio::test]
async fn test_dropping_stream_cancels_in_flight_fetch() {
    let started = Arc::new(Notify::new());
    let cancelled = Arc::new(AtomicBool::new(false));
    let config = ints_config(
        PendingLoader {
            started: started.clone(),
            cancelled: cancelled.clone(),
        },
        |_, _| true,
    );

    let (tx, events) = event_channel::<Container>();
    let stream = page(config, events);

    tx.next_page();
    started.notified().await;
    drop(stream);

    for _ in 0..100 {
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert!(cancelled.load(Ordering::SeqCst));
}

// ============================================================================
// Response Tests
// ============================================================================

#[test]
fn test_response_none() {
    let response = Response::<Container>::none();
    assert_eq!(response, Response::new(vec![], false));
}
