//! # pagekit
//!
//! A minimal, Rust-native incremental-loading / pagination coordination
//! engine: one state machine that serializes reload, next-page, and
//! in-place update events against a single asynchronous page source.
//!
//! ## Features
//!
//! - **Serialized event processing**: strict event-to-response ordering,
//!   even under bursty concurrent triggers (simultaneous pull-to-refresh
//!   and scrolled-to-bottom)
//! - **In-flight guard**: at most one outstanding fetch; redundant
//!   next-page requests are dropped, not queued
//! - **Silent updates**: mutate the accumulated container without
//!   publishing, for direct UI updates handled elsewhere
//! - **Fetch-everything mode**: [`all_pages`] re-issues next-page events
//!   until the source is exhausted
//! - **Cancellation**: dropping the response stream cancels the in-flight
//!   page load
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use pagekit::{event_channel, loader_fn, page, PagerConfig};
//!
//! #[tokio::main]
//! async fn main() -> pagekit::Result<()> {
//!     let config = PagerConfig::new(
//!         Vec::new,
//!         |mut items: Vec<Item>, page: ApiPage| {
//!             items.extend(page.results);
//!             items
//!         },
//!         |_, page: &ApiPage| page.next.is_some(),
//!         loader_fn(|items, last| async move { fetch_page(items, last).await }),
//!     );
//!
//!     let (triggers, events) = event_channel();
//!     let mut responses = page(config, events);
//!
//!     triggers.reload();
//!     while let Some(response) = responses.next().await {
//!         render(response?.container);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI gestures → Event stream (Reload / NextPage / Update /   │
//! │                               UpdateSilent)                 │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────┐
//! │  PagingEngine: eligibility filter → serialized transition   │
//! │  (single state cell, at most one in-flight load_page)       │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────┐
//! │  Response stream → consumer adapter → rendering             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the engine
pub mod error;

/// Control events and the push-based event channel
pub mod event;

/// Pager configuration and the page loader trait
pub mod config;

/// The core paging engine
pub mod engine;

/// Fetch-everything coordination over the engine
pub mod all_pages;

/// Consumer adapter boundary for list presenters
pub mod presenter;

// ============================================================================
// Re-exports
// ============================================================================

pub use all_pages::{all_pages, AllPagesStream};
pub use config::{loader_fn, FnLoader, PageLoader, PagerConfig};
pub use engine::{page, PagingEngine, Response, ResponseStream};
pub use error::{Error, Result};
pub use event::{event_channel, Event, EventKind, EventSender, EventStream};
pub use presenter::{paged_items, ItemPage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
