use std::cell::RefCell;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::{pin::Pin, rc::Rc};

use slotmap::{new_key_type, SlotMap};

use crate::query::Query;
use crate::query_cache::QueryCache;
use crate::{QueryError, QueryKey, QueryOptions, QueryState, QueryValue};

/// A subscription to one query at a time.
///
/// An observer owns the fetcher for its queries and fans state changes out to its listeners.
/// Point it at a key with [`set_key`](Self::set_key); a `None` key detaches it and never issues a
/// request. Clones share the same subscription.
#[derive(Clone)]
pub struct QueryObserver<K, V, E> {
    id: ObserverKey,
    cache: QueryCache,
    query: Rc<RefCell<Option<Query<K, V, E>>>>,
    fetcher: Fetcher<K, V, E>,
    options: QueryOptions,
    listeners: Rc<RefCell<SlotMap<ListenerKey, Listener<V, E>>>>,
}

impl<K, V, E> std::fmt::Debug for QueryObserver<K, V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryObserver")
            .field("id", &self.id)
            .field("fetcher", &"...")
            .field("options", &self.options)
            .field("listeners", &"...")
            .finish()
    }
}

new_key_type! {
    /// Handle returned by [`QueryObserver::add_listener`].
    pub struct ListenerKey;
}

pub(crate) type Fetcher<K, V, E> = Rc<dyn Fn(K) -> Pin<Box<dyn Future<Output = Result<V, E>>>>>;
type Listener<V, E> = Rc<dyn Fn(&QueryState<V, E>)>;

impl<K, V, E> QueryObserver<K, V, E>
where
    K: QueryKey + 'static,
    V: QueryValue + 'static,
    E: QueryError + 'static,
{
    pub(crate) fn new<F, Fu>(cache: QueryCache, fetcher: F, options: QueryOptions) -> Self
    where
        F: Fn(K) -> Fu + 'static,
        Fu: Future<Output = Result<V, E>> + 'static,
    {
        let fetcher = Rc::new(move |key| {
            Box::pin(fetcher(key)) as Pin<Box<dyn Future<Output = Result<V, E>>>>
        }) as Fetcher<K, V, E>;

        Self {
            id: next_id(),
            cache,
            query: Rc::new(RefCell::new(None)),
            fetcher,
            options,
            listeners: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// The key this observer is currently subscribed to.
    pub fn key(&self) -> Option<K> {
        self.query.borrow().as_ref().map(|query| query.key.clone())
    }

    /// Subscribes to `key`, or detaches when `key` is `None`.
    ///
    /// Listeners are told the new key's current state straight away. A query that has never been
    /// fetched, was invalidated, failed, or is stale gets fetched; one already in flight is shared.
    /// If the held entry was removed from the cache, setting the same key again moves the observer
    /// onto a fresh entry.
    pub fn set_key(&self, key: Option<K>) {
        let unchanged = match self.query.borrow().as_ref() {
            Some(query) => key.as_ref() == Some(&query.key) && !query.is_removed(),
            None => key.is_none(),
        };
        if unchanged {
            return;
        }

        let previous = self.query.borrow_mut().take();
        if let Some(previous) = previous {
            previous.unsubscribe(self);
        }

        self.cache.collect_garbage(self.options.gc_time);

        match key {
            None => self.notify(&QueryState::Created),
            Some(key) => {
                let query = self.cache.get_or_create_query::<K, V, E>(key);
                query.subscribe(self);
                *self.query.borrow_mut() = Some(query.clone());

                self.notify(&query.get_state());

                if query.needs_fetch(self.options.stale_time) {
                    query.execute();
                }
            }
        }
    }

    /// The current state of the subscribed query. [`QueryState::Created`] when detached.
    pub fn state(&self) -> QueryState<V, E> {
        self.query
            .borrow()
            .as_ref()
            .map(|query| query.get_state())
            .unwrap_or(QueryState::Created)
    }

    /// Fetches the subscribed query again unless a request is already in flight.
    ///
    /// An observer whose entry was removed from the cache resubscribes to a fresh one instead.
    pub fn refetch(&self) {
        let query = self.query.borrow().clone();
        match query {
            Some(query) if query.is_removed() => self.set_key(Some(query.key)),
            Some(query) => query.execute(),
            None => {}
        }
    }

    /// Registers a callback that receives every state change.
    pub fn add_listener(&self, listener: impl Fn(&QueryState<V, E>) + 'static) -> ListenerKey {
        self.listeners.borrow_mut().insert(Rc::new(listener))
    }

    /// Removes a callback. Returns false if it was already gone.
    pub fn remove_listener(&self, key: ListenerKey) -> bool {
        self.listeners.borrow_mut().remove(key).is_some()
    }

    /// Drops the subscription without notifying listeners. Used when the owning view unmounts.
    pub fn cleanup(&self) {
        let query = self.query.borrow_mut().take();
        if let Some(query) = query {
            query.unsubscribe(self);
        }
        if !self.listeners.borrow().is_empty() {
            log::debug!("QueryObserver::cleanup: listeners still registered");
        }
    }

    pub(crate) fn notify(&self, state: &QueryState<V, E>) {
        let listeners = self
            .listeners
            .borrow()
            .values()
            .cloned()
            .collect::<Vec<_>>();
        for listener in listeners {
            listener(state);
        }
    }

    pub(crate) fn get_fetcher(&self) -> Fetcher<K, V, E> {
        self.fetcher.clone()
    }

    pub(crate) fn get_id(&self) -> ObserverKey {
        self.id
    }
}

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ObserverKey(u32);

fn next_id() -> ObserverKey {
    ObserverKey(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}
