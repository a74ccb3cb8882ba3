//! Per-target crawl state
//!
//! Owned exclusively by one coordinator for the lifetime of one target's crawl
//! and discarded once its report is built.

use crate::crawler::FetchOutcome;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Frontier, visited pages and memoized fetch outcomes of one target
#[derive(Debug)]
pub struct CrawlState {
    /// Normalized page URLs awaiting a fetch, FIFO
    frontier: VecDeque<String>,

    /// Normalized page URLs already dequeued
    visited: HashSet<String>,

    /// Visited pages in the order they were dequeued
    crawled_pages: Vec<String>,

    /// One outcome per normalized URL, shared by every page that references it
    checked: HashMap<String, Arc<FetchOutcome>>,

    /// Page budget for this target
    max_pages: usize,
}

impl CrawlState {
    /// Creates a state whose frontier holds only the normalized root
    pub fn new(root: String, max_pages: usize) -> Self {
        Self {
            frontier: VecDeque::from([root]),
            visited: HashSet::new(),
            crawled_pages: Vec::new(),
            checked: HashMap::new(),
            max_pages,
        }
    }

    /// Dequeues the next unvisited page and marks it visited
    ///
    /// Returns None once the frontier is empty or the page budget is spent.
    /// Already-visited entries are skipped without counting against the budget.
    pub fn next_page(&mut self) -> Option<String> {
        while self.visited.len() < self.max_pages {
            let url = self.frontier.pop_front()?;
            if self.visited.insert(url.clone()) {
                self.crawled_pages.push(url.clone());
                return Some(url);
            }
        }
        None
    }

    /// Queues a page for crawling
    ///
    /// The page is dropped if it was already visited or the frontier already
    /// holds `3 × max_pages` entries. Returns true if it was queued.
    pub fn enqueue(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || self.frontier.len() >= self.frontier_capacity() {
            return false;
        }
        self.frontier.push_back(url);
        true
    }

    /// Returns the memoized outcome for a normalized URL
    pub fn checked(&self, url: &str) -> Option<Arc<FetchOutcome>> {
        self.checked.get(url).cloned()
    }

    /// Memoizes an outcome; an existing entry is never replaced
    pub fn record_checked(&mut self, url: String, outcome: FetchOutcome) -> Arc<FetchOutcome> {
        self.checked
            .entry(url)
            .or_insert_with(|| Arc::new(outcome))
            .clone()
    }

    /// Number of distinct URLs fetched for this target
    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    /// Number of pages visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of entries waiting in the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Visited pages in crawl order
    pub fn crawled_pages(&self) -> &[String] {
        &self.crawled_pages
    }

    fn frontier_capacity(&self) -> usize {
        self.max_pages.saturating_mul(3)
    }
}
