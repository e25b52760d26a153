#![allow(dead_code)]

use async_trait::async_trait;
use djdns_application::ports::PageGetter;
use djdns_domain::{DomainError, Page};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Returns a fixed page immediately and counts how often it was asked.
pub struct StaticPageGetter {
    page: Arc<Page>,
    fetches: AtomicUsize,
}

impl StaticPageGetter {
    pub fn new(page: Page) -> Self {
        Self {
            page: Arc::new(page),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageGetter for StaticPageGetter {
    async fn fetch_page(&self) -> Result<Arc<Page>, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.page.clone())
    }
}

/// Sleeps before handing out its page.
pub struct DelayedPageGetter {
    delay: Duration,
    page: Arc<Page>,
}

impl DelayedPageGetter {
    pub fn new(delay: Duration, page: Page) -> Self {
        Self {
            delay,
            page: Arc::new(page),
        }
    }
}

#[async_trait]
impl PageGetter for DelayedPageGetter {
    async fn fetch_page(&self) -> Result<Arc<Page>, DomainError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.page.clone())
    }
}

/// Always reports a backend failure.
pub struct FailingPageGetter {
    message: String,
}

impl FailingPageGetter {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl PageGetter for FailingPageGetter {
    async fn fetch_page(&self) -> Result<Arc<Page>, DomainError> {
        Err(DomainError::BackendError(self.message.clone()))
    }
}
