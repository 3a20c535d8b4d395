mod common;

use blog::api::{BlogApi, HttpBlogApi};
use blog::config::AppConfig;
use blog::error::{BlogError, Operation};
use blog::model::{BlogDraft, BlogId};

fn api(base_url: &str) -> HttpBlogApi {
    HttpBlogApi::new(AppConfig::default().with_api_base_url(base_url))
}

fn draft(title: &str) -> BlogDraft {
    BlogDraft {
        title: title.to_string(),
        description: "Description".to_string(),
        content: "Content".to_string(),
        category: vec!["CAREER".to_string()],
        cover_image: None,
        date: "2025-02-01T09:30:00.000Z".to_string(),
    }
}

#[tokio::test]
async fn lists_blogs_with_string_ids() {
    let (url, _) = common::spawn(vec![
        common::blog_json("1", "A"),
        common::blog_json("2", "B"),
    ])
    .await;

    let blogs = api(&url).list().await.unwrap();

    assert_eq!(blogs.len(), 2);
    assert_eq!(blogs[0].id, BlogId(1));
    assert_eq!(blogs[1].title, "B");
    assert_eq!(blogs[0].cover_image(), None);
}

#[tokio::test]
async fn gets_one_blog() {
    let (url, _) = common::spawn(vec![common::blog_json("7", "Seven")]).await;

    let blog = api(&url).get(BlogId(7)).await.unwrap();

    assert_eq!(blog.title, "Seven");
    assert_eq!(blog.paragraphs(), vec!["One.", "Two."]);
}

#[tokio::test]
async fn missing_blog_is_a_request_failure() {
    let (url, _) = common::spawn(vec![]).await;

    let error = api(&url).get(BlogId(3)).await.unwrap_err();

    assert_eq!(
        error,
        BlogError::RequestFailed {
            operation: Operation::GetBlog,
            status: 404
        }
    );
}

#[tokio::test]
async fn create_then_delete() {
    let (url, db) = common::spawn(vec![common::blog_json("1", "A")]).await;
    let api = api(&url);

    let created = api.create(&draft("Fresh")).await.unwrap();
    assert_eq!(created.id, BlogId(2));
    assert_eq!(created.title, "Fresh");
    assert_eq!(created.date, "2025-02-01T09:30:00.000Z");

    let stored = db.lock().unwrap().last().cloned().unwrap();
    assert!(stored.get("coverImage").is_none());
    assert_eq!(stored["category"][0], "CAREER");

    api.delete(BlogId(1)).await.unwrap();
    let remaining = api.list().await.unwrap();
    assert_eq!(
        remaining.iter().map(|blog| blog.id).collect::<Vec<_>>(),
        vec![BlogId(2)]
    );
}

#[tokio::test]
async fn deleting_twice_fails() {
    let (url, _) = common::spawn(vec![common::blog_json("1", "A")]).await;
    let api = api(&url);

    api.delete(BlogId(1)).await.unwrap();
    let error = api.delete(BlogId(1)).await.unwrap_err();

    assert_eq!(error.operation(), Operation::DeleteBlog);
    assert!(matches!(error, BlogError::RequestFailed { status: 404, .. }));
}

#[tokio::test]
async fn unreachable_server() {
    // Bind and drop a listener to get a port nothing is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = api(&format!("http://{addr}")).list().await.unwrap_err();

    assert!(matches!(
        error,
        BlogError::Unreachable {
            operation: Operation::ListBlogs,
            ..
        }
    ));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = axum::Router::new().route("/blogs", axum::routing::get(|| async { "not json" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let error = api(&format!("http://{addr}")).list().await.unwrap_err();

    assert!(matches!(error, BlogError::Decode { .. }));
}
