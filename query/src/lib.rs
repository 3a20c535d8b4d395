#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # About Blog Query
//!
//! A small asynchronous query cache used by the blog front end.
//!
//! Queries are useful for data fetching, caching, and synchronization with server state.
//!
//! A Query provides:
//! - caching of the last good result
//! - de-duplication of in-flight requests
//! - explicit invalidation (with a generation counter that discards stale responses)
//! - stale-time based refetching when a new observer subscribes
//! - dropping of unobserved entries once they are older than `gc_time`
//!
//! Nothing here depends on a UI framework. The [`QueryClient`] is an ordinary value built with an
//! injected [`QueryExecutor`], and views subscribe through [`QueryObserver`] listeners.
//!
//! # A Simple Example
//!
//! ```
//! use blog_query::*;
//! use futures::executor::LocalPool;
//!
//! #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
//! struct TrackId(u32);
//!
//! let mut pool = LocalPool::new();
//! let client = QueryClient::new(pool.spawner(), QueryOptions::default());
//!
//! let observer = client.observer(|id: TrackId| async move {
//!     Ok::<_, String>(format!("track {}", id.0))
//! });
//! observer.set_key(Some(TrackId(1)));
//! pool.run_until_stalled();
//!
//! assert_eq!(observer.state().data().cloned(), Some("track 1".to_string()));
//! ```

mod instant;
mod query;
mod query_cache;
mod query_client;
mod query_executor;
mod query_observer;
mod query_options;
mod query_state;

pub use instant::*;
pub use query_client::*;
pub use query_executor::*;
pub use query_observer::{ListenerKey, QueryObserver};
pub use query_options::*;
pub use query_state::*;

/// Convenience trait for query key requirements.
pub trait QueryKey: std::fmt::Debug + Clone + std::hash::Hash + Eq {}
impl<K> QueryKey for K where K: std::fmt::Debug + Clone + std::hash::Hash + Eq {}

/// Convenience trait for query value requirements.
pub trait QueryValue: std::fmt::Debug + Clone {}
impl<V> QueryValue for V where V: std::fmt::Debug + Clone {}

/// Convenience trait for query error requirements.
pub trait QueryError: std::fmt::Debug + std::fmt::Display + Clone {}
impl<E> QueryError for E where E: std::fmt::Debug + std::fmt::Display + Clone {}
