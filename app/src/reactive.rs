use blog_query::{QueryError, QueryExecutor, QueryKey, QueryObserver, QueryState, QueryValue};
use futures::future::LocalBoxFuture;
use leptos::*;

/// Runs query futures on the browser's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeptosExecutor;

impl QueryExecutor for LeptosExecutor {
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        leptos::spawn_local(future);
    }
}

/// Mirrors an observer's state into a signal for the lifetime of the current component.
///
/// The observer is unsubscribed when the component is disposed.
pub fn use_observer_state<K, V, E>(observer: &QueryObserver<K, V, E>) -> Signal<QueryState<V, E>>
where
    K: QueryKey + 'static,
    V: QueryValue + 'static,
    E: QueryError + 'static,
{
    let state = create_rw_signal(observer.state());

    let listener = observer.add_listener(move |next: &QueryState<V, E>| {
        state.set(next.clone());
    });

    let observer = observer.clone();
    on_cleanup(move || {
        observer.remove_listener(listener);
        observer.cleanup();
    });

    state.into()
}
