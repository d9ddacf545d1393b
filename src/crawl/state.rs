// src/crawl/state.rs
// =============================================================================
// State that outlives a single page: the set of addresses already mirrored,
// and the per-crawl report.
// =============================================================================

use std::collections::HashSet;

use serde::Serialize;

use crate::address::NormalizedAddress;

/// Canonical addresses fetched so far. Only ever grows.
///
/// One set lives for the whole session, so a page mirrored while crawling
/// one seed is not fetched again for the next seed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    addresses: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &NormalizedAddress) -> bool {
        self.addresses.contains(url.as_str())
    }

    /// Returns false if the address was already present.
    pub fn insert(&mut self, url: &NormalizedAddress) -> bool {
        self.addresses.insert(url.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }
}

/// What one top-level download did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    /// Local paths written, in the order they were saved.
    pub pages: Vec<String>,
    /// Links rewritten to point at a mirrored copy.
    pub local_links: usize,
    /// Links left pointing at the live site (not mirrored).
    pub absolute_links: usize,
    /// Links to other domains, left untouched.
    pub foreign_links: usize,
}

impl CrawlReport {
    pub fn new(seed: &NormalizedAddress) -> Self {
        Self {
            seed: seed.to_string(),
            ..Self::default()
        }
    }
}
