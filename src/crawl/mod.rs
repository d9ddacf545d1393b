// src/crawl/mod.rs
// =============================================================================
// This module mirrors a website.
//
// Features:
// - Depth-first crawling starting from a seed address
// - Only follows links on the seed's domain
// - Configurable depth limit
// - Never fetches the same canonical address twice in a session
// - Rewrites links to mirrored pages into relative paths
//
// Rust concepts:
// - Lifetimes: the crawler borrows config, visited set and collaborators
// - Generics with trait bounds: any Fetch / Store implementation plugs in
// - Vec as a stack: explicit depth-first traversal instead of recursion
// =============================================================================

mod engine;
mod rewrite;
mod state;


pub use engine::{CrawlConfig, Crawler, DownloadOutcome};
pub use state::{CrawlReport, VisitedSet};
