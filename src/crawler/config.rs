use serde::{Deserialize, Serialize};

/// Tunable limits for one crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Hard stop after this many pages. `None` leaves the run bounded only by
    /// the catalog itself.
    pub max_pages: Option<u32>,
    /// Settle interval between scroll-to-bottom passes.
    pub scroll_settle_ms: u64,
    /// Upper bound on scroll passes even if the page height keeps changing.
    pub scroll_max_iterations: u32,
    /// How long the initial navigation may take to reach a usable page.
    pub page_load_timeout_ms: u64,
    /// How long to keep polling for the card collection before treating the
    /// page as empty.
    pub element_wait_timeout_ms: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: None,
            scroll_settle_ms: 2_000,
            scroll_max_iterations: 30,
            page_load_timeout_ms: 30_000,
            element_wait_timeout_ms: 10_000,
        }
    }
}
