use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    #[error("script evaluation failed: {0}")]
    Script(String),
}

/// A live, scriptable view of one browser-rendered page.
///
/// The crawl owns exactly one session for its whole duration; the session
/// exposes one mutable "current page" at a time, so all calls are sequential.
pub trait RenderSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// Full rendered HTML of the current page.
    fn html(&mut self) -> Result<String, SessionError>;

    /// Monotonic proxy for how much content has been rendered.
    fn content_height(&mut self) -> Result<i64, SessionError>;

    fn scroll_to_bottom(&mut self) -> Result<(), SessionError>;

    /// Scrolls the first element matching `selector` into view and clicks it.
    fn click(&mut self, selector: &str) -> Result<(), SessionError>;

    /// Blocks for the given settle interval.
    fn settle(&mut self, wait: Duration);
}

/// Cooperative stop signal, checked once per page iteration.
///
/// Clones share the same flag, so one handle can stop a run owned elsewhere.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
