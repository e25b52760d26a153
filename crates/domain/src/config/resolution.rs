use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolutionConfig {
    /// Budget shared by the whole delegation tree of one query.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of delegation hops below the root page.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl ResolutionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_max_depth() -> usize {
    16
}
