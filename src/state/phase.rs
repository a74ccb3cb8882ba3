//! Lifecycle phase of a crawl coordinator

use crate::{Result, SiteCheckError};
use std::fmt;

/// Represents where a target's crawl currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlPhase {
    /// Created, nothing fetched yet
    #[default]
    Idle,

    /// Frontier is being drained
    Crawling,

    /// Frontier exhausted or page budget reached; the report has been produced
    Done,
}

impl CrawlPhase {
    /// Returns true if moving from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Crawling) | (Self::Crawling, Self::Done)
        )
    }

    /// Moves to `next`, rejecting out-of-order transitions
    pub fn advance(&mut self, next: CrawlPhase) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(SiteCheckError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    /// Returns the lowercase label of this phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Crawling => "crawling",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
