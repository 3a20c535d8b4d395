use futures::future::LocalBoxFuture;
use futures::executor::LocalSpawner;
use futures::task::LocalSpawnExt;

/// Spawns the futures a query needs to run.
///
/// The client never polls anything itself. In the browser this wraps `spawn_local`; in tests a
/// [`LocalSpawner`] from `futures::executor::LocalPool` lets the test decide when requests complete.
pub trait QueryExecutor {
    /// Runs the future to completion on the current thread.
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>);
}

impl QueryExecutor for LocalSpawner {
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        if let Err(error) = LocalSpawnExt::spawn_local(self, future) {
            log::error!("Failed to spawn query future: {error}");
        }
    }
}
