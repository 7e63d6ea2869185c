use tracing::{info, warn};

use super::pagination::PageAdvance;

/// Structured events emitted while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    PageStarted { page: u32 },
    PageCompleted { page: u32, records: usize },
    CardExtractionFailed { page: u32 },
    PaginationResult { page: u32, state: PageAdvance },
    RunCompleted { pages: u32, records: u64 },
}

/// Where run events go. The core never opens files or formats timestamps;
/// the sink decides what to do with each event.
pub trait EventSink {
    fn emit(&self, event: &CrawlEvent);
}

/// Default sink: forwards every event to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &CrawlEvent) {
        match event {
            CrawlEvent::PageStarted { page } => info!(page, "page_started"),
            CrawlEvent::PageCompleted { page, records } => {
                info!(page, records, "page_completed")
            }
            CrawlEvent::CardExtractionFailed { page } => warn!(page, "card_extraction_failed"),
            CrawlEvent::PaginationResult { page, state } => {
                info!(page, state = ?state, "pagination_result")
            }
            CrawlEvent::RunCompleted { pages, records } => info!(pages, records, "run_completed"),
        }
    }
}
