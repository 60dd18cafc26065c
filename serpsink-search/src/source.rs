use crate::{SearchError, SearchPage};

/// A paginated provider of search result pages.
///
/// `offset` is the absolute result offset into the provider's result list;
/// it is absent for the first page and `index * 10` afterwards. Implementors
/// return one page per call; termination heuristics live with the caller.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn page(&self, query: &str, offset: Option<u32>) -> Result<SearchPage, SearchError>;
}
