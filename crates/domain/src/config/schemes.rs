use crate::page::{Branch, Page};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A page served from memory under one scheme name.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemeConfig {
    #[serde(default)]
    pub branches: Vec<Branch>,

    /// Artificial latency before the page is handed out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl SchemeConfig {
    pub fn page(&self) -> Page {
        Page::new(self.branches.clone())
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay_ms.map(Duration::from_millis)
    }
}
