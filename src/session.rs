// src/session.rs
// =============================================================================
// A mirroring session: everything that lives for the whole process run.
//
// The visited set lives here, not in the crawler, so an address mirrored for
// one seed is reused (and not fetched again) by every later seed.
//
// This is also where user input is interpreted: "exit" quits, and input
// without a scheme gets "http://" in front.
// =============================================================================

use anyhow::Result;

use crate::address::is_absolute;
use crate::crawl::{CrawlConfig, Crawler, DownloadOutcome, VisitedSet};
use crate::net::Fetch;
use crate::store::Store;

pub struct Session<F, S> {
    config: CrawlConfig,
    visited: VisitedSet,
    fetcher: F,
    store: S,
}

impl<F: Fetch, S: Store> Session<F, S> {
    pub fn new(config: CrawlConfig, fetcher: F, store: S) -> Self {
        Self {
            config,
            visited: VisitedSet::new(),
            fetcher,
            store,
        }
    }

    // Mirrors one seed address, starting at depth 0
    pub async fn mirror(&mut self, address: &str) -> Result<DownloadOutcome> {
        Crawler::new(&self.config, &mut self.visited, &self.fetcher, &self.store)
            .download(0, address)
            .await
    }

    /// Number of distinct addresses fetched so far in this session.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    Blank,
    Mirror(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "exit" => Command::Exit,
            "" => Command::Blank,
            address => Command::Mirror(with_default_scheme(address)),
        }
    }
}

// Adds "http://" to addresses typed without a scheme
//
// Examples:
//   example.org           -> http://example.org
//   https://example.org   -> https://example.org (unchanged)
pub fn with_default_scheme(address: &str) -> String {
    if is_absolute(address) {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}
