use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use super::session::RenderSession;

/// Selector for the catalog's "next page" control.
const NEXT_CONTROL: &str = ".rc-pagination-next";

/// How long to give the next page to begin loading after the click.
const POST_CLICK_SETTLE_MS: u64 = 3_000;

/// Outcome of one pagination attempt.
///
/// `Exhausted` and `Failed` are both terminal for the run; they are kept apart
/// so the logs can tell a finished catalog from a control that broke mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAdvance {
    /// The next page is loading; the crawl loop continues.
    Advanced,
    /// The next control reports a disabled state: the catalog is fully
    /// traversed.
    Exhausted,
    /// The control is missing or the click failed.
    Failed,
}

/// Looks for the next-page control on the current page and, when it is live,
/// clicks through to the next page.
pub fn advance(session: &mut dyn RenderSession) -> PageAdvance {
    let html = match session.html() {
        Ok(html) => html,
        Err(err) => {
            warn!("Could not read the page while looking for the next control: {err}");
            return PageAdvance::Failed;
        }
    };

    let document = Html::parse_document(&html);
    let selector = Selector::parse(NEXT_CONTROL).unwrap();
    let control = match document.select(&selector).next() {
        Some(control) => control,
        None => {
            warn!("Next-page control not found");
            return PageAdvance::Failed;
        }
    };

    if control.value().attr("aria-disabled") == Some("true") {
        info!("Next-page control is disabled; catalog exhausted");
        return PageAdvance::Exhausted;
    }

    match session.click(NEXT_CONTROL) {
        Ok(()) => {
            session.settle(Duration::from_millis(POST_CLICK_SETTLE_MS));
            debug!("Advanced to the next catalog page");
            PageAdvance::Advanced
        }
        Err(err) => {
            warn!("Clicking the next-page control failed: {err}");
            PageAdvance::Failed
        }
    }
}
