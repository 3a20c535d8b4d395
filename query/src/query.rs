use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
    time::Duration,
};

use crate::{
    query_observer::{ObserverKey, QueryObserver},
    QueryData, QueryError, QueryExecutor, QueryKey, QueryState, QueryValue,
};

#[derive(Clone)]
pub(crate) struct Query<K, V, E> {
    pub(crate) key: K,
    executor: Rc<dyn QueryExecutor>,

    // State
    state: Rc<Cell<QueryState<V, E>>>,

    // Synchronization
    observers: Rc<RefCell<HashMap<ObserverKey, QueryObserver<K, V, E>>>>,
    // Bumped on every invalidation. A response that started under an older generation is dropped.
    generation: Rc<Cell<u64>>,
    in_flight: Rc<Cell<bool>>,
    removed: Rc<Cell<bool>>,
}

impl<K: PartialEq, V, E> PartialEq for Query<K, V, E> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: PartialEq, V, E> Eq for Query<K, V, E> {}

impl<K, V, E> Query<K, V, E>
where
    K: QueryKey + 'static,
    V: QueryValue + 'static,
    E: QueryError + 'static,
{
    pub(crate) fn new(key: K, executor: Rc<dyn QueryExecutor>) -> Self {
        Query {
            key,
            executor,
            state: Rc::new(Cell::new(QueryState::Created)),
            observers: Rc::new(RefCell::new(HashMap::new())),
            generation: Rc::new(Cell::new(0)),
            in_flight: Rc::new(Cell::new(false)),
            removed: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn set_state(&self, state: QueryState<V, E>) {
        self.state.set(state.clone());

        // Listeners may subscribe or unsubscribe while being notified.
        let observers = self
            .observers
            .try_borrow()
            .map(|observers| observers.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        for observer in observers {
            observer.notify(&state);
        }
    }

    pub(crate) fn update_state(&self, update_fn: impl FnOnce(&mut QueryState<V, E>)) {
        let mut state = self.state.replace(QueryState::Created);
        update_fn(&mut state);
        self.set_state(state);
    }

    /// If update returns Ok(_) the state will be updated and subscribers will be notified.
    /// If update returns Err(_) the state will not be updated and subscribers will not be notified.
    /// Err(_) should always contain the previous state.
    pub(crate) fn maybe_map_state(
        &self,
        update_fn: impl FnOnce(QueryState<V, E>) -> Result<QueryState<V, E>, QueryState<V, E>>,
    ) -> bool {
        let current_state = self.state.replace(QueryState::Created);

        match update_fn(current_state) {
            Ok(new_state) => {
                self.set_state(new_state);
                true
            }
            Err(old_state) => {
                self.state.set(old_state);
                false
            }
        }
    }

    pub(crate) fn get_state(&self) -> QueryState<V, E> {
        self.with_state(|state| state.clone())
    }

    // Useful to avoid clones.
    pub(crate) fn with_state<T>(&self, func: impl FnOnce(&QueryState<V, E>) -> T) -> T {
        let state = self.state.replace(QueryState::Created);
        let result = func(&state);
        self.state.set(state);
        result
    }

    pub(crate) fn subscribe(&self, observer: &QueryObserver<K, V, E>) {
        self.observers
            .borrow_mut()
            .insert(observer.get_id(), observer.clone());
    }

    pub(crate) fn unsubscribe(&self, observer: &QueryObserver<K, V, E>) {
        self.observers.borrow_mut().remove(&observer.get_id());
    }

    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.borrow().is_empty()
    }

    /// Marks the query invalid. Subscribed queries are refetched right away; a request already in
    /// flight is allowed to finish, its response is dropped, and a fresh request replaces it.
    ///
    /// Returns true if cached data (or a cached failure) was marked invalid.
    pub(crate) fn invalidate(&self) -> bool {
        self.generation.set(self.generation.get() + 1);

        let updated = self.maybe_map_state(|state| match state {
            QueryState::Loaded(data) | QueryState::Fetching(data) => Ok(QueryState::Invalid(data)),
            QueryState::Failed(_) => Ok(QueryState::Created),
            state => Err(state),
        });

        if !self.in_flight.get() && self.has_observers() {
            self.execute();
        }

        updated
    }

    /// Detaches the query from the cache. Any response still in flight is dropped.
    pub(crate) fn mark_removed(&self) {
        self.removed.set(true);
        self.generation.set(self.generation.get() + 1);
    }

    pub(crate) fn is_removed(&self) -> bool {
        self.removed.get()
    }

    /// True when nothing observes the query, no request is running, and its data (if any) is
    /// older than `gc_time`.
    pub(crate) fn is_collectable(&self, gc_time: Duration) -> bool {
        if self.in_flight.get() || self.has_observers() {
            return false;
        }
        match self.with_state(|state| state.updated_at()) {
            Some(updated_at) => updated_at.elapsed() >= gc_time,
            None => true,
        }
    }

    pub(crate) fn needs_fetch(&self, stale_time: Option<Duration>) -> bool {
        match self.with_state(|state| state.status()) {
            crate::QueryStatus::Loading => false,
            crate::QueryStatus::Idle | crate::QueryStatus::Error => !self.in_flight.get(),
            crate::QueryStatus::Success => {
                !self.in_flight.get()
                    && (self.with_state(|state| matches!(state, QueryState::Invalid(_)))
                        || self.is_stale(stale_time))
            }
        }
    }

    pub(crate) fn is_stale(&self, stale_time: Option<Duration>) -> bool {
        let last_update = self.with_state(|state| state.updated_at());

        match (last_update, stale_time) {
            (Some(updated_at), Some(stale_time)) => updated_at.elapsed() >= stale_time,
            _ => false,
        }
    }

    /**
     * Execution.
     */

    pub(crate) fn execute(&self) {
        if self.in_flight.get() {
            log::debug!("Request for {:?} already in flight", self.key);
            return;
        }

        let fetcher = {
            let observers = self.observers.borrow();
            observers.values().next().map(|o| o.get_fetcher())
        };
        let Some(fetcher) = fetcher else {
            return;
        };

        let generation = self.generation.get();
        self.in_flight.set(true);

        let next = self.with_state(|state| match state.query_data() {
            Some(data) => QueryState::Fetching(data.clone()),
            None => QueryState::Loading,
        });
        self.set_state(next);

        let fetch = fetcher(self.key.clone());
        let query = self.clone();
        self.executor.spawn_local(Box::pin(async move {
            let result = fetch.await;
            query.in_flight.set(false);

            if query.generation.get() != generation {
                log::debug!("Discarding stale response for {:?}", query.key);
                query.settle_stale();
                return;
            }

            match result {
                Ok(data) => query.set_state(QueryState::Loaded(QueryData::now(data))),
                Err(error) => {
                    log::warn!("Query {:?} failed: {error}", query.key);
                    query.set_state(QueryState::Failed(error));
                }
            }
        }));
    }

    // A response arrived after invalidation: refetch for current subscribers, otherwise park the
    // previous data as invalid so the next subscriber refetches it.
    fn settle_stale(&self) {
        if !self.removed.get() && self.has_observers() {
            self.execute();
            return;
        }

        self.maybe_map_state(|state| match state {
            QueryState::Fetching(data) => Ok(QueryState::Invalid(data)),
            QueryState::Loading => Ok(QueryState::Created),
            state => Err(state),
        });
    }
}
