use std::{borrow::Borrow, future::Future, rc::Rc};

use crate::{
    query_cache::QueryCache, QueryData, QueryError, QueryExecutor, QueryKey, QueryObserver,
    QueryOptions, QueryState, QueryValue,
};

/// The Cache Client to store query data.
/// Exposes utility functions to manage queries.
///
/// Queries can be:
/// - [Observed](Self::observer)
///     - An observer subscribes to one key at a time and fetches it when needed.
/// - [Invalidated](Self::invalidate_query)
///     - Query will refetch on next usage. Active queries are immediately refetched.
/// - [Introspected](Self::peek_query_state)
///     - Lets you see what the current value of a query is.
/// - [Manually updated](Self::set_query_data)
///     - Useful when you have updated a value and want to set it in cache instead of waiting for a refetch.
/// - [Removed](Self::remove_query)
///     - Drops the entry. Responses still in flight for it are discarded.
///
/// A client is cheap to clone; clones share the same cache.
#[derive(Clone)]
pub struct QueryClient {
    pub(crate) cache: QueryCache,
    pub(crate) default_options: QueryOptions,
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("size", &self.size())
            .field("default_options", &self.default_options)
            .finish()
    }
}

impl QueryClient {
    /// Creates a new Query Client that runs its requests on `executor`.
    pub fn new(executor: impl QueryExecutor + 'static, default_options: QueryOptions) -> Self {
        Self {
            cache: QueryCache::new(Rc::new(executor)),
            default_options,
        }
    }

    /// The options observers get unless they are created with their own.
    pub fn default_options(&self) -> QueryOptions {
        self.default_options
    }

    /// Creates a detached observer that fetches with `fetcher`.
    ///
    /// Call [`QueryObserver::set_key`] to subscribe it to a key.
    pub fn observer<K, V, E, Fu>(&self, fetcher: impl Fn(K) -> Fu + 'static) -> QueryObserver<K, V, E>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
        Fu: Future<Output = Result<V, E>> + 'static,
    {
        self.observer_with_options(fetcher, self.default_options)
    }

    /// Creates a detached observer with custom options.
    pub fn observer_with_options<K, V, E, Fu>(
        &self,
        fetcher: impl Fn(K) -> Fu + 'static,
        options: QueryOptions,
    ) -> QueryObserver<K, V, E>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
        Fu: Future<Output = Result<V, E>> + 'static,
    {
        QueryObserver::new(self.cache.clone(), fetcher, options)
    }

    /// Retrieve the current state for an existing query.
    /// If the query does not exist, [`None`](Option::None) will be returned.
    /// Useful for when you want to introspect the state of a query without subscribing to it.
    pub fn peek_query_state<K, V, E>(&self, key: &K) -> Option<QueryState<V, E>>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        self.cache.get_query::<K, V, E>(key).map(|q| q.get_state())
    }

    /// Attempts to invalidate an entry in the Query Cache.
    /// Matching query is marked as invalid. If something is subscribed to it, it is refetched right
    /// away and any response already in flight is discarded.
    ///
    /// Returns true if the entry held data (or a failure) that was invalidated.
    ///
    /// Example:
    /// ```
    /// use blog_query::*;
    /// use futures::executor::LocalPool;
    ///
    /// let pool = LocalPool::new();
    /// let client = QueryClient::new(pool.spawner(), QueryOptions::default());
    /// client.set_query_data::<u32, String, String>(0, "zero".to_string());
    ///
    /// assert!(client.invalidate_query::<u32, String, String>(0u32));
    /// assert!(!client.invalidate_query::<u32, String, String>(1u32));
    /// ```
    pub fn invalidate_query<K, V, E>(&self, key: impl Borrow<K>) -> bool
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        self.cache
            .get_query::<K, V, E>(key.borrow())
            .map(|query| query.invalidate())
            .unwrap_or(false)
    }

    /// Attempts to invalidate multiple entries in the Query Cache with a common <K, V, E> type.
    ///
    /// Returns the keys that were successfully invalidated.
    pub fn invalidate_queries<K, V, E, Q>(&self, keys: impl IntoIterator<Item = Q>) -> Vec<Q>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
        Q: Borrow<K> + 'static,
    {
        keys.into_iter()
            .filter(|key| self.invalidate_query::<K, V, E>(key.borrow()))
            .collect()
    }

    /// Invalidate all queries with a common <K, V, E> type.
    pub fn invalidate_query_type<K, V, E>(&self)
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        for query in self.cache.get_queries::<K, V, E>() {
            query.invalidate();
        }
    }

    /// Invalidates all queries in the cache.
    pub fn invalidate_all_queries(&self) {
        self.cache.invalidate_all_queries()
    }

    /// Removes a query from the cache.
    ///
    /// Observers still subscribed keep their last state, and a response still in flight for the
    /// removed entry is ignored. The next subscriber creates a fresh entry; an observer that was
    /// subscribed moves onto it when its key is set again or it refetches.
    ///
    /// Returns true if the entry existed.
    pub fn remove_query<K, V, E>(&self, key: impl Borrow<K>) -> bool
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        let removed = self.cache.evict_query::<K, V, E>(key.borrow());
        if removed {
            log::debug!("Removed query {:?}", key.borrow());
        }
        removed
    }

    /// Drops unobserved entries whose data is older than the default `gc_time`.
    ///
    /// Returns the number of entries dropped.
    pub fn collect_garbage(&self) -> usize {
        self.cache.collect_garbage(self.default_options.gc_time)
    }

    /// Returns the current number of entries in the cache.
    pub fn size(&self) -> usize {
        self.cache.size()
    }

    /// A synchronous function that can be used to immediately set a query's data.
    ///
    /// If the query does not exist, it will be created.
    ///
    /// If the updater function returns [`None`](Option::None), the query data will not be updated.
    ///
    /// If the updater function receives [`None`](Option::None) as input, you can return
    /// [`None`](Option::None) to bail out of the update and thus not create a new cache entry.
    pub fn update_query_data<K, V, E>(
        &self,
        key: K,
        updater: impl FnOnce(Option<&V>) -> Option<V>,
    ) where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        match self.cache.get_query::<K, V, E>(&key) {
            Some(query) => {
                query.maybe_map_state(|state| match state {
                    QueryState::Fetching(ref data) => match updater(Some(&data.data)) {
                        Some(result) => Ok(QueryState::Fetching(QueryData::now(result))),
                        None => Err(state),
                    },
                    QueryState::Loaded(ref data) | QueryState::Invalid(ref data) => {
                        match updater(Some(&data.data)) {
                            Some(result) => Ok(QueryState::Loaded(QueryData::now(result))),
                            None => Err(state),
                        }
                    }
                    QueryState::Created | QueryState::Loading | QueryState::Failed(_) => {
                        match updater(None) {
                            Some(result) => Ok(QueryState::Loaded(QueryData::now(result))),
                            None => Err(state),
                        }
                    }
                });
            }
            None => {
                if let Some(result) = updater(None) {
                    let query = self.cache.get_or_create_query::<K, V, E>(key);
                    query.set_state(QueryState::Loaded(QueryData::now(result)));
                }
            }
        }
    }

    /// Update the query's data.
    /// If the query does not exist, it will be created.
    pub fn set_query_data<K, V, E>(&self, key: K, data: V)
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        self.update_query_data::<K, V, E>(key, |_| Some(data));
    }

    /// Mutate the existing data if it exists.
    /// All listeners will be notified, regardless of whether the data was updated or not.
    pub fn update_query_data_mut<K, V, E>(
        &self,
        key: impl Borrow<K>,
        updater: impl FnOnce(&mut V),
    ) -> bool
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        let Some(query) = self.cache.get_query::<K, V, E>(key.borrow()) else {
            return false;
        };

        let mut updated = false;
        query.update_state(|state| {
            if let Some(data) = state.data_mut() {
                updater(data);
                updated = true;
            }
        });
        updated
    }

    /// Clears the cache. All queries will be removed.
    pub fn clear(&self) {
        self.cache.clear_all_queries()
    }
}
