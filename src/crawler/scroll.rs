use std::time::Duration;

use tracing::{debug, warn};

use super::config::CrawlConfig;
use super::session::RenderSession;

/// Triggers lazy loading by scrolling to the bottom until two consecutive
/// height measurements agree.
///
/// The page gives no convergence guarantee, so the loop is capped at
/// `scroll_max_iterations` and returns regardless once the cap is hit.
/// Measurement failures end stabilization early; the page is then handed to
/// extraction in whatever state it reached.
pub fn stabilize(session: &mut dyn RenderSession, config: &CrawlConfig) {
    let mut last_height = match session.content_height() {
        Ok(height) => height,
        Err(err) => {
            warn!("Could not measure page height: {err}");
            return;
        }
    };

    for iteration in 0..config.scroll_max_iterations {
        if let Err(err) = session.scroll_to_bottom() {
            warn!("Scroll failed: {err}");
            return;
        }
        session.settle(Duration::from_millis(config.scroll_settle_ms));

        match session.content_height() {
            Ok(height) if height == last_height => {
                debug!(iteration, height, "Page height stabilized");
                return;
            }
            Ok(height) => last_height = height,
            Err(err) => {
                warn!("Could not re-measure page height: {err}");
                return;
            }
        }
    }

    warn!(
        cap = config.scroll_max_iterations,
        "Page height kept changing; giving up on stabilization"
    );
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeSession;
    use super::*;

    fn config(max_iterations: u32) -> CrawlConfig {
        CrawlConfig {
            scroll_settle_ms: 0,
            scroll_max_iterations: max_iterations,
            ..CrawlConfig::default()
        }
    }

    #[test]
    fn stops_after_first_repeated_height() {
        let mut session = FakeSession::new(vec![String::new()]).with_heights(vec![300, 300]);

        stabilize(&mut session, &config(10));

        assert_eq!(session.scrolls, 1);
    }

    #[test]
    fn keeps_scrolling_while_height_grows() {
        let mut session =
            FakeSession::new(vec![String::new()]).with_heights(vec![100, 180, 240, 240]);

        stabilize(&mut session, &config(10));

        assert_eq!(session.scrolls, 3);
    }

    #[test]
    fn iteration_cap_bounds_a_page_that_never_settles() {
        // Heights are consumed one per measurement and never repeat.
        let heights: Vec<i64> = (0..100).map(|n| 100 + n * 7).collect();
        let mut session = FakeSession::new(vec![String::new()]).with_heights(heights);

        stabilize(&mut session, &config(5));

        assert_eq!(session.scrolls, 5);
    }
}
