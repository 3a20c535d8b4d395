use std::{
    any::{Any, TypeId},
    cell::RefCell,
    collections::{hash_map::Entry, HashMap},
    rc::Rc,
    time::Duration,
};

use crate::{query::Query, QueryError, QueryExecutor, QueryKey, QueryState, QueryValue};

#[derive(Clone)]
pub(crate) struct QueryCache {
    executor: Rc<dyn QueryExecutor>,
    cache: Rc<RefCell<HashMap<(TypeId, TypeId), Box<dyn CacheEntryTrait>>>>,
}

pub(crate) struct CacheEntry<K, V, E>(HashMap<K, Query<K, V, E>>);

// Trait to enable cache introspection among distinct cache entry maps.
pub(crate) trait CacheEntryTrait {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn size(&self) -> usize;
    fn queries(&self) -> Vec<Rc<dyn AnyQuery>>;
    fn collect_garbage(&mut self, gc_time: Duration) -> usize;
}

// Type-erased operations, run after the cache borrow has been released.
pub(crate) trait AnyQuery {
    fn invalidate(&self) -> bool;
    fn mark_removed(&self);
}

impl<K, V, E> AnyQuery for Query<K, V, E>
where
    K: QueryKey + 'static,
    V: QueryValue + 'static,
    E: QueryError + 'static,
{
    fn invalidate(&self) -> bool {
        Query::invalidate(self)
    }

    fn mark_removed(&self) {
        Query::mark_removed(self)
    }
}

impl<K, V, E> CacheEntryTrait for CacheEntry<K, V, E>
where
    K: QueryKey + 'static,
    V: QueryValue + 'static,
    E: QueryError + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn size(&self) -> usize {
        self.0.len()
    }

    fn queries(&self) -> Vec<Rc<dyn AnyQuery>> {
        self.0
            .values()
            .map(|query| Rc::new(query.clone()) as Rc<dyn AnyQuery>)
            .collect()
    }

    fn collect_garbage(&mut self, gc_time: Duration) -> usize {
        let before = self.0.len();
        self.0.retain(|key, query| {
            if query.is_collectable(gc_time) {
                log::debug!("Collecting query {key:?}");
                query.mark_removed();
                false
            } else {
                true
            }
        });
        before - self.0.len()
    }
}

impl QueryCache {
    pub(crate) fn new(executor: Rc<dyn QueryExecutor>) -> Self {
        Self {
            executor,
            cache: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub(crate) fn get_or_create_query<K, V, E>(&self, key: K) -> Query<K, V, E>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        let executor = self.executor.clone();
        self.use_cache(move |cache| match cache.entry(key.clone()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                log::debug!("Creating query {key:?}");
                entry.insert(Query::new(key, executor)).clone()
            }
        })
    }

    pub(crate) fn get_query<K, V, E>(&self, key: &K) -> Option<Query<K, V, E>>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        self.use_cache_option(|cache| cache.get(key).cloned())
    }

    pub(crate) fn get_queries<K, V, E>(&self) -> Vec<Query<K, V, E>>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        self.use_cache_option(|cache| Some(cache.values().cloned().collect()))
            .unwrap_or_default()
    }

    pub(crate) fn evict_query<K, V, E>(&self, key: &K) -> bool
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        let removed = self.use_cache_option_mut::<K, V, E, _, _>(|cache| cache.remove(key));

        match removed {
            Some(query) => {
                query.mark_removed();
                true
            }
            None => false,
        }
    }

    /// Drops every unobserved entry whose data is older than `gc_time`. Returns how many went.
    pub(crate) fn collect_garbage(&self, gc_time: Option<Duration>) -> usize {
        let Some(gc_time) = gc_time else {
            return 0;
        };
        self.cache
            .borrow_mut()
            .values_mut()
            .map(|entry| entry.collect_garbage(gc_time))
            .sum()
    }

    pub(crate) fn size(&self) -> usize {
        self.cache.borrow().values().map(|entry| entry.size()).sum()
    }

    pub(crate) fn invalidate_all_queries(&self) {
        for query in self.all_queries() {
            query.invalidate();
        }
    }

    pub(crate) fn clear_all_queries(&self) {
        let queries = self.all_queries();
        self.cache.borrow_mut().clear();
        for query in queries {
            query.mark_removed();
        }
    }

    fn all_queries(&self) -> Vec<Rc<dyn AnyQuery>> {
        self.cache
            .borrow()
            .values()
            .flat_map(|entry| entry.queries())
            .collect()
    }

    fn use_cache_option<K, V, E, R>(
        &self,
        func: impl FnOnce(&HashMap<K, Query<K, V, E>>) -> Option<R>,
    ) -> Option<R>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        let cache = self.cache.borrow();
        let cache = cache.get(&type_key::<K, V, E>())?;
        let cache = cache.as_any().downcast_ref::<CacheEntry<K, V, E>>()?;
        func(&cache.0)
    }

    fn use_cache_option_mut<K, V, E, F, R>(&self, func: F) -> Option<R>
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
        F: FnOnce(&mut HashMap<K, Query<K, V, E>>) -> Option<R>,
    {
        let mut cache = self.cache.borrow_mut();
        let cache = cache.get_mut(&type_key::<K, V, E>())?;
        let cache = cache.as_any_mut().downcast_mut::<CacheEntry<K, V, E>>()?;
        func(&mut cache.0)
    }

    fn use_cache<K, V, E, R>(&self, func: impl FnOnce(&mut HashMap<K, Query<K, V, E>>) -> R) -> R
    where
        K: QueryKey + 'static,
        V: QueryValue + 'static,
        E: QueryError + 'static,
    {
        let mut cache = self.cache.borrow_mut();

        let cache: &mut Box<dyn CacheEntryTrait> = match cache.entry(type_key::<K, V, E>()) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let wrapped: CacheEntry<K, V, E> = CacheEntry(HashMap::new());
                v.insert(Box::new(wrapped))
            }
        };

        // The type key guarantees the downcast; a mismatch would be a bug in this module.
        match cache.as_any_mut().downcast_mut::<CacheEntry<K, V, E>>() {
            Some(cache) => func(&mut cache.0),
            None => unreachable!("{EXPECT_CACHE_ERROR}"),
        }
    }
}

fn type_key<K, V, E>() -> (TypeId, TypeId)
where
    K: 'static,
    V: 'static,
    E: 'static,
{
    (TypeId::of::<K>(), TypeId::of::<QueryState<V, E>>())
}

const EXPECT_CACHE_ERROR: &str = "Query Cache Type Mismatch. This should not happen.";
