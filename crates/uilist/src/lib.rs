//! uilist: Self-refreshing typed element collections for UI test automation
//!
//! This crate keeps a strongly-typed logical list of UI component wrappers
//! (rows, cards, list items) in sync with a live, mutating element set. Every
//! lookup and assertion implicitly resynchronizes the list, polls its
//! predicate on a configured retry budget, and reports failed steps through a
//! pluggable sink.
//!
//! The underlying browser driver is consumed through two narrow traits
//! ([`Element`] and [`ElementQuery`]), so the core works against any
//! automation backend that can evaluate a selector to an ordered set of
//! handles.
//!
//! # Examples
//!
//! ## A typed list over a live query
//!
//! ```ignore
//! use std::sync::Arc;
//! use uilist::{ElementList, GenericRow, RetryPolicy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // `query` is any Arc<dyn ElementQuery> from your driver adapter.
//!     let mut fruits = ElementList::new("Fruits", query)
//!         .with_factory(|root| Ok(GenericRow::new(root)))
//!         .with_retry_policy(Arc::new(RetryPolicy::default()));
//!
//!     // Lookups resynchronize lazily and retry until the budget is spent.
//!     let apple = fruits.get_precise("Apple").await?;
//!     assert_eq!(apple.meta().element_name(), Some("Apple"));
//!
//!     // Collection assertions follow the same poll-retry pattern.
//!     fruits.assert_size_greater_than(1).await?;
//!     fruits.assert_some_contains_text("Pie").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom item types
//!
//! ```ignore
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use uilist::{Element, ItemMeta, ListItem, Result};
//!
//! struct OrderRow {
//!     root: Arc<dyn Element>,
//!     meta: ItemMeta,
//! }
//!
//! #[async_trait]
//! impl ListItem for OrderRow {
//!     fn root(&self) -> &Arc<dyn Element> { &self.root }
//!     fn meta(&self) -> &ItemMeta { &self.meta }
//!     fn meta_mut(&mut self) -> &mut ItemMeta { &mut self.meta }
//!
//!     // Identifier derived from a data attribute instead of visible text.
//!     async fn id(&self) -> Result<String> {
//!         Ok(self.root.attribute("data-order-id").await?.unwrap_or_default())
//!     }
//! }
//! ```
//!
//! # Concurrency
//!
//! A list is single-threaded by construction: every operation takes
//! `&mut self` and is meant to run on the thread driving the browser
//! session. Blocking happens only at the retry sleeps (a hard ceiling of
//! `retry_amount x retry_interval`, no backoff curve) and at backend
//! round-trips. Step reporting can be offloaded to a single background
//! worker ([`BackgroundReporter`]) without breaking step ordering, as long
//! as the single-producer discipline holds.

pub mod backend;
mod config;
mod enrich;
mod error;
mod factory;
pub mod fingerprint;
mod item;
mod list;
pub mod report;

// Re-export error types
pub use error::{Error, Result};

// Re-export the list core
pub use list::ElementList;

// Re-export the backend seam
pub use backend::{Element, ElementQuery};

// Re-export item contract types
pub use item::{GenericRow, ItemMeta, ListItem, NameResolver, ParentRef};

// Re-export construction and enrichment seams
pub use enrich::Enricher;
pub use factory::ItemFactory;

// Re-export configuration
pub use config::{DEFAULT_RETRY_AMOUNT, DEFAULT_RETRY_INTERVAL, RetryPolicy};

// Re-export reporting API
pub use report::{BackgroundReporter, NoopReporter, Phrases, Reporter, StepStatus, TracingReporter};
