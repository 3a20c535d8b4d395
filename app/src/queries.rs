use std::rc::Rc;

use blog_query::{QueryClient, QueryObserver, QueryState};
use leptos::*;

use crate::api::BlogApi;
use crate::error::BlogError;
use crate::model::{Blog, BlogDraft, BlogId};

/// Key of the query holding every blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllBlogs;

pub type BlogListState = QueryState<Vec<Blog>, BlogError>;
pub type BlogState = QueryState<Blog, BlogError>;

pub type BlogListObserver = QueryObserver<AllBlogs, Vec<Blog>, BlogError>;
pub type BlogObserver = QueryObserver<BlogId, Blog, BlogError>;

/// Blog reads and writes, routed through the query cache.
///
/// Reads go through observers so concurrent views share requests. Writes call the API directly
/// and invalidate what they changed once the server has accepted them.
#[derive(Clone)]
pub struct BlogQueries {
    client: QueryClient,
    api: Rc<dyn BlogApi>,
}

impl BlogQueries {
    pub fn new(client: QueryClient, api: impl BlogApi + 'static) -> Self {
        Self::from_shared(client, Rc::new(api))
    }

    pub fn from_shared(client: QueryClient, api: Rc<dyn BlogApi>) -> Self {
        Self { client, api }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    /// An observer already subscribed to the list of all blogs.
    pub fn list_observer(&self) -> BlogListObserver {
        let api = self.api.clone();
        let observer = self.client.observer(move |_: AllBlogs| {
            let api = api.clone();
            async move { api.list().await }
        });
        observer.set_key(Some(AllBlogs));
        observer
    }

    /// A detached observer for single blogs. Point it at an id with `set_key`.
    pub fn detail_observer(&self) -> BlogObserver {
        let api = self.api.clone();
        self.client.observer(move |id: BlogId| {
            let api = api.clone();
            async move { api.get(id).await }
        })
    }

    /// Creates a blog, then invalidates the list so it shows up.
    pub async fn create(&self, draft: BlogDraft) -> Result<Blog, BlogError> {
        let blog = self.api.create(&draft).await?;
        self.invalidate_list();
        Ok(blog)
    }

    /// Deletes a blog, then invalidates the list and forgets the blog's own entry.
    pub async fn delete(&self, id: BlogId) -> Result<(), BlogError> {
        self.api.delete(id).await?;
        self.invalidate_list();
        self.client.remove_query::<BlogId, Blog, BlogError>(id);
        Ok(())
    }

    fn invalidate_list(&self) {
        self.client
            .invalidate_query::<AllBlogs, Vec<Blog>, BlogError>(AllBlogs);
    }
}

/// Makes `queries` available to every component below the current one.
pub fn provide_blog_queries(queries: BlogQueries) {
    provide_context(queries);
}

/// Retrieves the blog queries from context.
///
/// Panics if [`provide_blog_queries`] was not called higher up.
pub fn use_blog_queries() -> BlogQueries {
    use_context::<BlogQueries>().expect("BlogQueries missing. Call provide_blog_queries in App.")
}

#[cfg(test)]
mod tests {
    use futures::executor::LocalPool;

    use super::*;
    use crate::testing::{blog, draft, MockBlogApi};

    fn setup(blogs: Vec<Blog>) -> (LocalPool, BlogQueries, Rc<MockBlogApi>) {
        let pool = LocalPool::new();
        let api = Rc::new(MockBlogApi::with_blogs(blogs));
        let client = QueryClient::new(pool.spawner(), Default::default());
        let queries = BlogQueries::from_shared(client, api.clone());
        (pool, queries, api)
    }

    fn ids(state: &BlogListState) -> Vec<BlogId> {
        state
            .data()
            .map(|blogs| blogs.iter().map(|blog| blog.id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn created_blog_appears_with_a_new_id() {
        let (mut pool, queries, api) = setup(vec![blog(1, "A")]);
        let list = queries.list_observer();
        pool.run_until_stalled();

        let created = pool
            .run_until(queries.create(draft("Fresh")))
            .expect("create succeeds");
        pool.run_until_stalled();

        assert_ne!(created.id, BlogId(1));
        assert_eq!(ids(&list.state()), vec![BlogId(1), created.id]);
        assert_eq!(api.calls("list"), 2);
    }

    #[test]
    fn deleted_blog_disappears() {
        let (mut pool, queries, _) = setup(vec![blog(1, "A"), blog(2, "B")]);
        let list = queries.list_observer();
        pool.run_until_stalled();

        pool.run_until(queries.delete(BlogId(1)))
            .expect("delete succeeds");
        pool.run_until_stalled();

        assert_eq!(ids(&list.state()), vec![BlogId(2)]);
    }

    #[test]
    fn detail_without_id_makes_no_request() {
        let (mut pool, queries, api) = setup(vec![blog(1, "A")]);
        let detail = queries.detail_observer();
        detail.set_key(None);
        pool.run_until_stalled();

        assert_eq!(detail.state(), QueryState::Created);
        assert_eq!(api.calls("get"), 0);
    }

    #[test]
    fn concurrent_detail_mounts_share_a_request() {
        let (mut pool, queries, api) = setup(vec![blog(1, "A")]);
        let first = queries.detail_observer();
        let second = queries.detail_observer();
        first.set_key(Some(BlogId(1)));
        second.set_key(Some(BlogId(1)));
        pool.run_until_stalled();

        assert_eq!(api.calls("get"), 1);
        assert_eq!(second.state().data().map(|b| b.title.clone()), Some("A".to_string()));
    }

    #[test]
    fn failed_create_leaves_the_list_alone() {
        let (mut pool, queries, api) = setup(vec![blog(1, "A")]);
        let list = queries.list_observer();
        pool.run_until_stalled();

        api.fail_next_write();
        let result = pool.run_until(queries.create(draft("Nope")));
        pool.run_until_stalled();

        assert!(result.is_err());
        assert_eq!(api.calls("list"), 1);
        assert_eq!(ids(&list.state()), vec![BlogId(1)]);
    }

    #[test]
    fn failed_delete_keeps_list_and_detail() {
        let (mut pool, queries, api) = setup(vec![blog(1, "A"), blog(2, "B")]);
        let list = queries.list_observer();
        let detail = queries.detail_observer();
        detail.set_key(Some(BlogId(1)));
        pool.run_until_stalled();

        api.fail_next_write();
        let result = pool.run_until(queries.delete(BlogId(1)));
        pool.run_until_stalled();

        assert!(result.is_err());
        assert_eq!(api.calls("list"), 1);
        assert_eq!(api.calls("get"), 1);
        assert_eq!(ids(&list.state()), vec![BlogId(1), BlogId(2)]);
        assert!(queries
            .client()
            .peek_query_state::<BlogId, Blog, BlogError>(&BlogId(1))
            .is_some());
        assert_eq!(detail.state().data().map(|b| b.title.clone()), Some("A".to_string()));
    }

    #[test]
    fn deleting_one_blog_keeps_another_selected() {
        let (mut pool, queries, _) = setup(vec![blog(1, "A"), blog(2, "B")]);
        let list = queries.list_observer();
        let detail = queries.detail_observer();
        detail.set_key(Some(BlogId(2)));
        pool.run_until_stalled();

        pool.run_until(queries.delete(BlogId(1)))
            .expect("delete succeeds");
        pool.run_until_stalled();

        assert_eq!(ids(&list.state()), vec![BlogId(2)]);
        assert_eq!(detail.state().data().map(|b| b.title.clone()), Some("B".to_string()));
    }

    #[test]
    fn delete_forgets_the_cached_detail() {
        let (mut pool, queries, _) = setup(vec![blog(1, "A")]);
        let detail = queries.detail_observer();
        detail.set_key(Some(BlogId(1)));
        pool.run_until_stalled();
        detail.cleanup();

        pool.run_until(queries.delete(BlogId(1)))
            .expect("delete succeeds");

        assert_eq!(
            queries
                .client()
                .peek_query_state::<BlogId, Blog, BlogError>(&BlogId(1)),
            None
        );
    }
}
