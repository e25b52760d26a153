use async_trait::async_trait;
use djdns_application::ports::PageGetter;
use djdns_domain::{DomainError, Page};
use std::sync::Arc;

/// Serves a fixed page without delay.
#[derive(Debug, Clone)]
pub struct InMemoryPageGetter {
    page: Arc<Page>,
}

impl InMemoryPageGetter {
    /// The page is normalized once here, before it is ever matched against.
    pub fn new(mut page: Page) -> Self {
        page.normalize();
        Self {
            page: Arc::new(page),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl PageGetter for InMemoryPageGetter {
    async fn fetch_page(&self) -> Result<Arc<Page>, DomainError> {
        Ok(Arc::clone(&self.page))
    }
}
