use std::time::Duration;

/// Options for queries created by a [`QueryClient`](crate::QueryClient).
///
/// The client holds the defaults; individual observers may override them with
/// [`QueryClient::observer_with_options`](crate::QueryClient::observer_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// The duration that should pass before loaded data is considered stale.
    /// Stale data is refetched when a new observer subscribes to the query.
    /// If no stale_time, loaded data is never considered stale.
    /// Default is 10 seconds.
    pub stale_time: Option<Duration>,
    /// The duration an unobserved query keeps its data before it may be dropped from the cache.
    /// Entries are swept when an observer changes key, or with
    /// [`QueryClient::collect_garbage`](crate::QueryClient::collect_garbage).
    /// If no gc_time, entries are only dropped when removed explicitly.
    /// Default is 5 minutes.
    pub gc_time: Option<Duration>,
}

impl QueryOptions {
    /// Set the stale_time.
    pub fn set_stale_time(self, stale_time: Option<Duration>) -> Self {
        QueryOptions { stale_time, ..self }
    }

    /// Set the gc_time.
    pub fn set_gc_time(self, gc_time: Option<Duration>) -> Self {
        QueryOptions { gc_time, ..self }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Some(DEFAULT_STALE_TIME),
            gc_time: Some(DEFAULT_GC_TIME),
        }
    }
}

const DEFAULT_STALE_TIME: Duration = Duration::from_secs(10);
const DEFAULT_GC_TIME: Duration = Duration::from_secs(60 * 5);
