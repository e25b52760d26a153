use async_trait::async_trait;
use djdns_domain::{DomainError, Page};
use std::sync::Arc;

/// A data source that hands out its current page.
///
/// Implementations may take arbitrarily long or fail; callers bound the wait
/// themselves. Any caching or internal mutation is the implementation's own
/// business and must be synchronized internally.
#[async_trait]
pub trait PageGetter: Send + Sync {
    async fn fetch_page(&self) -> Result<Arc<Page>, DomainError>;
}
