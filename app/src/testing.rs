//! In-memory [`BlogApi`] for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;

use crate::api::BlogApi;
use crate::error::{BlogError, Operation};
use crate::model::{Blog, BlogDraft, BlogId};

#[derive(Default)]
pub(crate) struct MockBlogApi {
    blogs: RefCell<Vec<Blog>>,
    calls: RefCell<HashMap<&'static str, usize>>,
    fail_next_write: Cell<bool>,
}

impl MockBlogApi {
    pub(crate) fn with_blogs(blogs: Vec<Blog>) -> Self {
        Self {
            blogs: RefCell::new(blogs),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self, method: &str) -> usize {
        self.calls.borrow().get(method).copied().unwrap_or(0)
    }

    pub(crate) fn fail_next_write(&self) {
        self.fail_next_write.set(true);
    }

    fn record(&self, method: &'static str) {
        *self.calls.borrow_mut().entry(method).or_default() += 1;
    }

    fn check_write(&self, operation: Operation) -> Result<(), BlogError> {
        if self.fail_next_write.replace(false) {
            return Err(BlogError::RequestFailed {
                operation,
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl BlogApi for MockBlogApi {
    async fn list(&self) -> Result<Vec<Blog>, BlogError> {
        self.record("list");
        Ok(self.blogs.borrow().clone())
    }

    async fn get(&self, id: BlogId) -> Result<Blog, BlogError> {
        self.record("get");
        self.blogs
            .borrow()
            .iter()
            .find(|blog| blog.id == id)
            .cloned()
            .ok_or(BlogError::RequestFailed {
                operation: Operation::GetBlog,
                status: 404,
            })
    }

    async fn create(&self, draft: &BlogDraft) -> Result<Blog, BlogError> {
        self.record("create");
        self.check_write(Operation::CreateBlog)?;

        let mut blogs = self.blogs.borrow_mut();
        let next = blogs.iter().map(|blog| blog.id.0).max().unwrap_or(0) + 1;
        let blog = Blog {
            id: BlogId(next),
            title: draft.title.clone(),
            description: draft.description.clone(),
            content: draft.content.clone(),
            category: draft.category.clone(),
            cover_image: draft.cover_image.clone(),
            date: draft.date.clone(),
        };
        blogs.push(blog.clone());
        Ok(blog)
    }

    async fn delete(&self, id: BlogId) -> Result<(), BlogError> {
        self.record("delete");
        self.check_write(Operation::DeleteBlog)?;

        let mut blogs = self.blogs.borrow_mut();
        let before = blogs.len();
        blogs.retain(|blog| blog.id != id);
        if blogs.len() == before {
            return Err(BlogError::RequestFailed {
                operation: Operation::DeleteBlog,
                status: 404,
            });
        }
        Ok(())
    }
}

pub(crate) fn blog(id: u64, title: &str) -> Blog {
    Blog {
        id: BlogId(id),
        title: title.to_string(),
        description: format!("About {title}"),
        content: format!("{title} first.\n\n{title} second."),
        category: vec!["TECH".to_string()],
        cover_image: None,
        date: "2025-01-05T10:00:00.000Z".to_string(),
    }
}

pub(crate) fn draft(title: &str) -> BlogDraft {
    BlogDraft {
        title: title.to_string(),
        description: "Description".to_string(),
        content: "Content".to_string(),
        category: vec!["CAREER".to_string()],
        cover_image: None,
        date: "2025-01-05T10:00:00.000Z".to_string(),
    }
}
