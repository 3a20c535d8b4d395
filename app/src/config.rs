use blog_query::QueryOptions;

/// Where the blog API lives when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

/// Collection path of the blog resource, relative to the API base URL.
pub const BLOGS_PATH: &str = "/blogs";

/// Settings the app is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the blog API, without a trailing slash.
    pub api_base_url: String,
    /// Defaults for every blog query.
    pub query_options: QueryOptions,
}

impl AppConfig {
    /// Points the app at a different API server.
    pub fn with_api_base_url(self, api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            ..self
        }
    }

    /// Set the query defaults.
    pub fn with_query_options(self, query_options: QueryOptions) -> Self {
        Self {
            query_options,
            ..self
        }
    }

    pub(crate) fn blogs_url(&self) -> String {
        format!("{}{BLOGS_PATH}", self.api_base_url)
    }

    pub(crate) fn blog_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}{BLOGS_PATH}/{id}", self.api_base_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            query_options: QueryOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let config = AppConfig::default();
        assert_eq!(config.blogs_url(), "http://localhost:3001/blogs");
        assert_eq!(config.blog_url(7), "http://localhost:3001/blogs/7");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = AppConfig::default().with_api_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.blogs_url(), "http://127.0.0.1:9000/blogs");
    }

    #[test]
    fn query_options_are_kept_across_builders() {
        let options = QueryOptions::default().set_stale_time(None).set_gc_time(None);
        let config = AppConfig::default()
            .with_query_options(options)
            .with_api_base_url("http://blogs.test");

        assert_eq!(config.query_options, options);
        assert_eq!(config.api_base_url, "http://blogs.test");
        assert_ne!(config.query_options, AppConfig::default().query_options);
    }
}
