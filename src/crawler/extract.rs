use std::time::Duration;

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::models::ListingRecord;

use super::config::CrawlConfig;
use super::events::{CrawlEvent, EventSink};
use super::session::RenderSession;

/// Selector for one catalog entry's DOM fragment.
const CARD: &str = "div.property-card__content";
const LINK: &str = "a[href]";
const LOCATION: &str = ".property-card__detail-top__left";
const PRICE: &str = ".property-card__detail-price";
/// Custom element whose attributes carry the structured specs.
const SPECS: &str = "pt-main-specs";

/// Poll interval while waiting for the card collection to appear.
const CARD_POLL_MS: u64 = 250;

/// Extracts every listing card on the current, stabilized page.
///
/// A page where the card collection never shows up within
/// `element_wait_timeout_ms` yields zero records, never an error, so the
/// caller can still attempt pagination afterwards. Individual cards fail
/// independently: a sparse card still becomes a record, and only a card with
/// none of its root fields is dropped.
pub fn extract(
    session: &mut dyn RenderSession,
    page: u32,
    base: &Url,
    captured_at: NaiveDate,
    config: &CrawlConfig,
    sink: &dyn EventSink,
) -> Vec<ListingRecord> {
    let html = match await_cards(session, config) {
        Some(html) => html,
        None => {
            warn!(page, "No listing cards appeared within the wait timeout");
            return Vec::new();
        }
    };

    let document = Html::parse_document(&html);
    let card_selector = Selector::parse(CARD).unwrap();

    let mut records = Vec::new();
    for card in document.select(&card_selector) {
        match extract_card(card, base, captured_at) {
            Some(record) => records.push(record),
            None => {
                warn!(page, "Dropping a card that exposed none of its fields");
                sink.emit(&CrawlEvent::CardExtractionFailed { page });
            }
        }
    }

    debug!(page, cards = records.len(), "Extracted listing cards");
    records
}

/// Polls the rendered page until at least one card matches, bounded by the
/// element wait timeout.
fn await_cards(session: &mut dyn RenderSession, config: &CrawlConfig) -> Option<String> {
    let card_selector = Selector::parse(CARD).unwrap();
    let attempts = (config.element_wait_timeout_ms / CARD_POLL_MS).max(1);

    for attempt in 0..attempts {
        match session.html() {
            Ok(html) => {
                let document = Html::parse_document(&html);
                if document.select(&card_selector).next().is_some() {
                    return Some(html);
                }
            }
            Err(err) => {
                warn!("Could not read page HTML: {err}");
                return None;
            }
        }
        if attempt + 1 < attempts {
            session.settle(Duration::from_millis(CARD_POLL_MS));
        }
    }
    None
}

/// Converts one card into a record. Every field is attempted on its own and
/// collapses to `None` on failure. Returns `None` only when link, location and
/// price are all missing, which marks the card malformed rather than sparse.
fn extract_card(card: ElementRef<'_>, base: &Url, captured_at: NaiveDate) -> Option<ListingRecord> {
    let link = card
        .select(&Selector::parse(LINK).unwrap())
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| base.join(href).ok());
    let location = text_of(card, LOCATION);
    let price = text_of(card, PRICE);

    if link.is_none() && location.is_none() && price.is_none() {
        return None;
    }

    let specs = card.select(&Selector::parse(SPECS).unwrap()).next();
    let spec_attr =
        |name: &str| specs.and_then(|el| el.value().attr(name)).map(str::to_string);

    Some(ListingRecord {
        id: link.as_ref().and_then(listing_id),
        price,
        location,
        area: spec_attr("squaremeter"),
        bedrooms: spec_attr("bedrooms"),
        bathrooms: spec_attr("toilets"),
        parking: spec_attr("parking"),
        link: link.map(|url| url.to_string()),
        captured_at,
    })
}

fn text_of(card: ElementRef<'_>, selector: &str) -> Option<String> {
    card.select(&Selector::parse(selector).unwrap())
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Deterministic listing id: the last non-empty path segment of the link,
/// ignoring any query or fragment.
fn listing_id(link: &Url) -> Option<String> {
    link.path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).last())
        .map(str::to_string)
}
