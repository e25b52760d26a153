use super::InMemoryPageGetter;
use async_trait::async_trait;
use djdns_application::ports::PageGetter;
use djdns_domain::{DomainError, Page};
use std::sync::Arc;
use std::time::Duration;

/// Waits a fixed delay before delegating to an inner getter. Used to make a
/// scheme deliberately slower than the resolution deadline.
pub struct SlowPageGetter {
    delay: Duration,
    inner: Arc<dyn PageGetter>,
}

impl SlowPageGetter {
    /// Delays, then serves an empty page.
    pub fn new(delay: Duration) -> Self {
        Self::wrapping(delay, Arc::new(InMemoryPageGetter::new(Page::default())))
    }

    pub fn wrapping(delay: Duration, inner: Arc<dyn PageGetter>) -> Self {
        Self { delay, inner }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PageGetter for SlowPageGetter {
    async fn fetch_page(&self) -> Result<Arc<Page>, DomainError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_page().await
    }
}
