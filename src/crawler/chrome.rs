use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use tracing::info;

use super::config::CrawlConfig;
use super::session::{RenderSession, SessionError};

/// Pause between scrolling the clicked element into view and the click itself,
/// so the control is actually on screen when the event fires.
const CLICK_PAUSE_MS: u64 = 1_000;

/// Render session backed by a headless Chrome tab.
///
/// Dropping the session closes the browser, so it is released on every exit
/// path of a run.
pub struct ChromeSession {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    pub fn launch(config: &CrawlConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open a tab")?;
        tab.set_default_timeout(Duration::from_millis(config.page_load_timeout_ms));

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    fn eval(&self, script: &str) -> Result<Value, SessionError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|err| SessionError::Script(err.to_string()))?;
        Ok(result.value.unwrap_or(Value::Null))
    }
}

impl RenderSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map(|_| ())
            .map_err(|err| SessionError::Navigation {
                url: url.to_string(),
                reason: err.to_string(),
            })
    }

    fn html(&mut self) -> Result<String, SessionError> {
        let value = self.eval("document.documentElement.outerHTML")?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SessionError::Script("page returned no HTML".to_string()))
    }

    fn content_height(&mut self) -> Result<i64, SessionError> {
        let value = self.eval("document.body.scrollHeight")?;
        value
            .as_f64()
            .map(|height| height as i64)
            .ok_or_else(|| SessionError::Script("scrollHeight is not a number".to_string()))
    }

    fn scroll_to_bottom(&mut self) -> Result<(), SessionError> {
        self.eval("window.scrollTo(0, document.body.scrollHeight);")?;
        Ok(())
    }

    fn click(&mut self, selector: &str) -> Result<(), SessionError> {
        let quoted = js_string(selector);
        let focus = format!(
            r#"
            (() => {{
                const control = document.querySelector({quoted});
                if (!control) return false;
                control.scrollIntoView();
                return true;
            }})()
            "#
        );
        if !self.eval(&focus)?.as_bool().unwrap_or(false) {
            return Err(SessionError::Script(format!(
                "no element matches {selector}"
            )));
        }

        thread::sleep(Duration::from_millis(CLICK_PAUSE_MS));

        let click = format!(
            r#"
            (() => {{
                const control = document.querySelector({quoted});
                if (!control) return false;
                control.click();
                return true;
            }})()
            "#
        );
        if !self.eval(&click)?.as_bool().unwrap_or(false) {
            return Err(SessionError::Script(format!(
                "{selector} disappeared before the click"
            )));
        }
        Ok(())
    }

    fn settle(&mut self, wait: Duration) {
        thread::sleep(wait);
    }
}

/// Embeds text in a script as a JS string literal, keeping quotes and
/// backslashes inert. String serialization to JSON cannot fail.
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap()
}
