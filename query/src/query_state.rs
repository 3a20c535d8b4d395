use crate::Instant;

/// The lifecycle of a query.
///
/// Each variant corresponds to a particular state of a query, starting from creation and covering
/// every transition up to invalidation or failure.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum QueryState<V, E> {
    /// The initial state of a Query upon its creation.
    ///
    /// No fetch has been issued. This is also what a detached observer reports.
    #[default]
    Created,

    /// Query is fetching for the first time.
    Loading,

    /// A Query is in the process of fetching, not being its first fetch.
    ///
    /// The associated `QueryData<V>` holds the previous data.
    Fetching(QueryData<V>),

    /// The query has successfully completed a fetch operation.
    Loaded(QueryData<V>),

    /// The query completed a fetch, but the data has been marked as invalid.
    ///
    /// The associated `QueryData<V>` holds the invalidated data until a refetch replaces it.
    Invalid(QueryData<V>),

    /// The most recent fetch failed.
    Failed(E),
}

/// Coarse status of a query, as views usually want it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing requested yet.
    Idle,
    /// A first fetch is in progress.
    Loading,
    /// Data is available (possibly being refreshed).
    Success,
    /// The last fetch failed.
    Error,
}

impl<V, E> QueryState<V, E> {
    /// Returns the QueryData for the current QueryState, if present.
    pub fn query_data(&self) -> Option<&QueryData<V>> {
        match self {
            QueryState::Loading | QueryState::Created | QueryState::Failed(_) => None,
            QueryState::Fetching(data) | QueryState::Loaded(data) | QueryState::Invalid(data) => {
                Some(data)
            }
        }
    }

    /// Returns the data contained within the QueryState, if present.
    pub fn data(&self) -> Option<&V> {
        self.query_data().map(|s| &s.data)
    }

    /// Returns the error of the last fetch, if it failed.
    pub fn error(&self) -> Option<&E> {
        match self {
            QueryState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the last updated timestamp for the QueryState, if present.
    pub fn updated_at(&self) -> Option<Instant> {
        self.query_data().map(|s| s.updated_at)
    }

    /// Maps the state onto [`QueryStatus`].
    pub fn status(&self) -> QueryStatus {
        match self {
            QueryState::Created => QueryStatus::Idle,
            QueryState::Loading => QueryStatus::Loading,
            QueryState::Fetching(_) | QueryState::Loaded(_) | QueryState::Invalid(_) => {
                QueryStatus::Success
            }
            QueryState::Failed(_) => QueryStatus::Error,
        }
    }

    /// True while a request for this query is outstanding.
    pub fn is_fetching(&self) -> bool {
        matches!(self, QueryState::Loading | QueryState::Fetching(_))
    }

    pub(crate) fn data_mut(&mut self) -> Option<&mut V> {
        match self {
            QueryState::Loading | QueryState::Created | QueryState::Failed(_) => None,
            QueryState::Fetching(data) | QueryState::Loaded(data) | QueryState::Invalid(data) => {
                Some(&mut data.data)
            }
        }
    }
}

impl<V, E> std::fmt::Debug for QueryState<V, E>
where
    V: std::fmt::Debug,
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Loading => write!(f, "Loading"),
            Self::Fetching(arg0) => f.debug_tuple("Fetching").field(arg0).finish(),
            Self::Loaded(arg0) => f.debug_tuple("Loaded").field(arg0).finish(),
            Self::Invalid(arg0) => f.debug_tuple("Invalid").field(arg0).finish(),
            Self::Failed(arg0) => f.debug_tuple("Failed").field(arg0).finish(),
        }
    }
}

/// The latest data for a Query.
#[derive(Clone, PartialEq, Eq)]
pub struct QueryData<V> {
    /// The Data.
    pub data: V,
    /// The instant this data was retrieved.
    pub updated_at: Instant,
}

impl<V> QueryData<V> {
    /// Creates a new QueryData with the given data and the current time as the updated_at timestamp.
    pub fn now(data: V) -> Self {
        Self {
            data,
            updated_at: Instant::now(),
        }
    }
}

impl<V> std::fmt::Debug for QueryData<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryData")
            .field("data", &self.data)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
