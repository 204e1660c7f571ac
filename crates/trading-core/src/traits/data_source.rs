//! Bar feed trait definition.

use crate::error::FeedError;
use crate::types::Bar;

/// A finite, time-ordered source of bars.
///
/// Feeds are consumed once; replaying a series means opening the source
/// again.
pub trait BarFeed {
    /// Get the next bar, or `None` once the source is exhausted.
    ///
    /// Bars come out with strictly increasing timestamps. Malformed input
    /// is reported as an error rather than skipped.
    fn next_bar(&mut self) -> Result<Option<Bar>, FeedError>;

    /// Get the feed name.
    fn name(&self) -> &str;
}

impl<F: BarFeed + ?Sized> BarFeed for Box<F> {
    fn next_bar(&mut self) -> Result<Option<Bar>, FeedError> {
        (**self).next_bar()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown {
        left: i64,
    }

    impl BarFeed for Countdown {
        fn next_bar(&mut self) -> Result<Option<Bar>, FeedError> {
            if self.left == 0 {
                return Ok(None);
            }
            self.left -= 1;
            Ok(Some(Bar::flat(10 - self.left, 1.0)))
        }

        fn name(&self) -> &str {
            "countdown"
        }
    }

    #[test]
    fn test_boxed_feed_drains() {
        let mut feed: Box<dyn BarFeed> = Box::new(Countdown { left: 3 });
        let mut seen = Vec::new();
        while let Some(bar) = feed.next_bar().unwrap() {
            seen.push(bar.timestamp);
        }
        assert_eq!(seen, vec![8, 9, 10]);
        assert_eq!(feed.name(), "countdown");
        assert!(feed.next_bar().unwrap().is_none());
    }
}
