//! State module for tracking one target's crawl
//!
//! # Components
//!
//! - `CrawlState`: frontier, visited pages and the memoized fetch outcomes of one target
//! - `CrawlPhase`: the `Idle → Crawling → Done` lifecycle of a coordinator

mod crawl_state;
mod phase;

// Re-export main types
pub use crawl_state::CrawlState;
pub use phase::CrawlPhase;
