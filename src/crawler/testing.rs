//! Scripted stand-ins for the render session and the event sink, plus HTML
//! builders matching the catalog markup.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::events::{CrawlEvent, EventSink};
use super::session::{RenderSession, SessionError};

/// Render session backed by a fixed sequence of page states. Clicking the
/// next control moves to the following state; heights are consumed one per
/// measurement, repeating the last one once exhausted.
pub struct FakeSession {
    pages: Vec<String>,
    heights: Vec<i64>,
    current: usize,
    height_cursor: usize,
    pub scrolls: usize,
    pub clicks: usize,
    pub fail_navigation: bool,
    pub fail_click: bool,
}

impl FakeSession {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            pages,
            heights: vec![100],
            current: 0,
            height_cursor: 0,
            scrolls: 0,
            clicks: 0,
            fail_navigation: false,
            fail_click: false,
        }
    }

    pub fn with_heights(mut self, heights: Vec<i64>) -> Self {
        self.heights = heights;
        self.height_cursor = 0;
        self
    }
}

impl RenderSession for FakeSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        if self.fail_navigation {
            return Err(SessionError::Navigation {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn html(&mut self) -> Result<String, SessionError> {
        Ok(self.pages.get(self.current).cloned().unwrap_or_default())
    }

    fn content_height(&mut self) -> Result<i64, SessionError> {
        let height = self
            .heights
            .get(self.height_cursor)
            .or(self.heights.last())
            .copied()
            .unwrap_or(0);
        self.height_cursor += 1;
        Ok(height)
    }

    fn scroll_to_bottom(&mut self) -> Result<(), SessionError> {
        self.scrolls += 1;
        Ok(())
    }

    fn click(&mut self, _selector: &str) -> Result<(), SessionError> {
        self.clicks += 1;
        if self.fail_click {
            return Err(SessionError::Script("node detached".to_string()));
        }
        if self.current + 1 < self.pages.len() {
            self.current += 1;
        }
        Ok(())
    }

    fn settle(&mut self, _wait: Duration) {}
}

/// Sink that records every event for later assertions. Clones share the same
/// buffer, so a clone can be handed to the crawler and inspected afterwards.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<CrawlEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<CrawlEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &CrawlEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// One listing card in the catalog's markup, optionally with its specs
/// element.
pub fn card(id: &str, with_specs: bool) -> String {
    let specs = if with_specs {
        r#"<pt-main-specs squaremeter="62" bedrooms="3" toilets="2" parking="1"></pt-main-specs>"#
    } else {
        ""
    };
    format!(
        r#"<div class="property-card__content">
            <a href="/inmueble/{id}">Ver inmueble</a>
            <div class="property-card__detail-top__left">Chapinero, Bogotá</div>
            <div class="property-card__detail-price">$450.000.000</div>
            {specs}
        </div>"#
    )
}

/// A card whose root fields are all missing; the extractor drops it.
pub fn malformed_card() -> String {
    r#"<div class="property-card__content"><span>sin datos</span></div>"#.to_string()
}

pub fn page(cards: &[String], next_disabled: bool) -> String {
    let disabled = if next_disabled { "true" } else { "false" };
    format!(
        r#"<html><body>
            {}
            <ul class="rc-pagination">
                <li class="rc-pagination-next" aria-disabled="{disabled}"><button>Siguiente</button></li>
            </ul>
        </body></html>"#,
        cards.join("\n")
    )
}

pub fn page_without_next(cards: &[String]) -> String {
    format!("<html><body>{}</body></html>", cards.join("\n"))
}
