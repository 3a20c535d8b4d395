use thiserror::Error;

/// The API call that was being attempted when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListBlogs,
    GetBlog,
    CreateBlog,
    DeleteBlog,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Operation::ListBlogs => "fetch blogs",
            Operation::GetBlog => "fetch blog",
            Operation::CreateBlog => "create blog",
            Operation::DeleteBlog => "delete blog",
        };
        f.write_str(verb)
    }
}

/// Errors produced by the blog API.
///
/// Errors are `Clone` so they can be stored in query state and rendered by more than one view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlogError {
    /// The server answered with a non-success status.
    #[error("Failed to {operation} (HTTP {status})")]
    RequestFailed { operation: Operation, status: u16 },

    /// No response came back.
    #[error("Failed to {operation}: {reason}")]
    Unreachable { operation: Operation, reason: String },

    /// The server answered, but the body was not what we expected.
    #[error("Failed to {operation}: unexpected response ({reason})")]
    Decode { operation: Operation, reason: String },
}

impl BlogError {
    pub fn operation(&self) -> Operation {
        match self {
            BlogError::RequestFailed { operation, .. }
            | BlogError::Unreachable { operation, .. }
            | BlogError::Decode { operation, .. } => *operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_operation() {
        let error = BlogError::RequestFailed {
            operation: Operation::ListBlogs,
            status: 500,
        };
        assert_eq!(error.to_string(), "Failed to fetch blogs (HTTP 500)");

        let error = BlogError::Unreachable {
            operation: Operation::DeleteBlog,
            reason: "connection refused".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to delete blog: connection refused");
        assert_eq!(error.operation(), Operation::DeleteBlog);
    }
}
