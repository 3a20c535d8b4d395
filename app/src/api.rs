use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::{BlogError, Operation};
use crate::model::{Blog, BlogDraft, BlogId};

/// Operations on the blog resource.
///
/// Futures are not `Send`; in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait BlogApi {
    async fn list(&self) -> Result<Vec<Blog>, BlogError>;
    async fn get(&self, id: BlogId) -> Result<Blog, BlogError>;
    /// Returns the created blog, including its server-assigned id.
    async fn create(&self, draft: &BlogDraft) -> Result<Blog, BlogError>;
    async fn delete(&self, id: BlogId) -> Result<(), BlogError>;
}

/// [`BlogApi`] over HTTP. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpBlogApi {
    client: reqwest::Client,
    config: AppConfig,
}

impl HttpBlogApi {
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, BlogError> {
        let response = request
            .send()
            .await
            .map_err(|error| BlogError::Unreachable {
                operation,
                reason: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{operation} failed with status {status}");
            return Err(BlogError::RequestFailed {
                operation,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BlogError> {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|error| BlogError::Decode {
                operation,
                reason: error.to_string(),
            })
    }
}

#[async_trait(?Send)]
impl BlogApi for HttpBlogApi {
    async fn list(&self) -> Result<Vec<Blog>, BlogError> {
        let request = self.client.get(self.config.blogs_url());
        self.send_json(Operation::ListBlogs, request).await
    }

    async fn get(&self, id: BlogId) -> Result<Blog, BlogError> {
        let request = self.client.get(self.config.blog_url(id));
        self.send_json(Operation::GetBlog, request).await
    }

    async fn create(&self, draft: &BlogDraft) -> Result<Blog, BlogError> {
        let request = self.client.post(self.config.blogs_url()).json(draft);
        let blog: Blog = self.send_json(Operation::CreateBlog, request).await?;
        log::debug!("Created blog {}", blog.id);
        Ok(blog)
    }

    async fn delete(&self, id: BlogId) -> Result<(), BlogError> {
        let request = self.client.delete(self.config.blog_url(id));
        self.send(Operation::DeleteBlog, request).await?;
        log::debug!("Deleted blog {id}");
        Ok(())
    }
}
