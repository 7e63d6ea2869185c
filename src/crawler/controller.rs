use chrono::Local;
use tracing::{info, warn};
use url::Url;

use crate::models::{CrawlRunSummary, ListingRecord};

use super::chrome::ChromeSession;
use super::config::CrawlConfig;
use super::events::{CrawlEvent, EventSink, TracingSink};
use super::extract;
use super::pagination::{self, PageAdvance};
use super::scroll;
use super::session::{CancelFlag, RenderSession};

/// Drives one crawl run: load, stabilize, extract, advance, repeat.
///
/// The controller exclusively owns the growing record sequence and the run
/// summary. Nothing past the initial load ever surfaces as an error; a
/// partially completed crawl still returns everything harvested so far, and
/// callers judge run health from `records_extracted`.
pub struct Crawler {
    config: CrawlConfig,
    cancel: CancelFlag,
    sink: Box<dyn EventSink>,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Self {
        Self::with_sink(config, Box::new(TracingSink))
    }

    pub fn with_sink(config: CrawlConfig, sink: Box<dyn EventSink>) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
            sink,
        }
    }

    /// Handle for stopping the run from another thread. The flag is checked
    /// once per page iteration, so the current page still finishes.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Runs the crawl against a fresh headless Chrome session. The session is
    /// dropped, and with it the browser, on every exit path.
    pub fn run(&self, start_url: &str) -> (Vec<ListingRecord>, CrawlRunSummary) {
        let mut session = match ChromeSession::launch(&self.config) {
            Ok(session) => session,
            Err(err) => {
                warn!("Could not establish a render session: {err:#}");
                return (Vec::new(), CrawlRunSummary::default());
            }
        };
        self.run_with_session(&mut session, start_url)
    }

    /// The crawl loop against any render session.
    pub fn run_with_session(
        &self,
        session: &mut dyn RenderSession,
        start_url: &str,
    ) -> (Vec<ListingRecord>, CrawlRunSummary) {
        let mut records = Vec::new();
        let mut summary = CrawlRunSummary::default();

        // Fatal path: without a parsed base URL or an initial page there is
        // nothing to crawl. Summary stays at zero pages.
        let base = match Url::parse(start_url) {
            Ok(url) => url,
            Err(err) => {
                warn!("Invalid start URL {start_url}: {err}");
                return (records, summary);
            }
        };
        if let Err(err) = session.navigate(start_url) {
            warn!("Initial load of {start_url} failed: {err}");
            return (records, summary);
        }

        let captured_at = Local::now().date_naive();
        info!("Crawling {start_url}");

        loop {
            if self.cancel.is_cancelled() {
                info!(
                    pages = summary.pages_visited,
                    "Cancellation requested; stopping"
                );
                break;
            }
            if let Some(max) = self.config.max_pages {
                if summary.pages_visited >= max {
                    warn!(max, "Reached the configured page limit; stopping");
                    break;
                }
            }

            summary.pages_visited += 1;
            let page = summary.pages_visited;
            self.sink.emit(&CrawlEvent::PageStarted { page });

            scroll::stabilize(session, &self.config);
            let mut page_records = extract::extract(
                session,
                page,
                &base,
                captured_at,
                &self.config,
                self.sink.as_ref(),
            );
            summary.records_extracted += page_records.len() as u64;
            self.sink.emit(&CrawlEvent::PageCompleted {
                page,
                records: page_records.len(),
            });
            records.append(&mut page_records);

            let outcome = pagination::advance(session);
            self.sink.emit(&CrawlEvent::PaginationResult {
                page,
                state: outcome,
            });
            match outcome {
                PageAdvance::Advanced => continue,
                PageAdvance::Exhausted | PageAdvance::Failed => break,
            }
        }

        self.sink.emit(&CrawlEvent::RunCompleted {
            pages: summary.pages_visited,
            records: summary.records_extracted,
        });
        (records, summary)
    }
}
