// src/crawl/engine.rs
// =============================================================================
// The recursive mirror crawl.
//
// How it works:
// 1. Fetch the seed page (depth 0)
// 2. Walk its links in document order
// 3. For every same-domain link, try to mirror the target at depth + 1,
//    which walks *that* page's links before we move on (depth-first)
// 4. Rewrite the link: a relative path if the target is mirrored, the
//    absolute address if it is not
// 5. Save the rewritten page once all of its links are settled
//
// Depth-first recursion is written with an explicit stack of open pages,
// so a huge --max-depth cannot overflow the call stack. The top of the
// stack is the page whose links we are currently walking; a link whose
// target gets fetched pushes that target, and the link is settled when the
// target is popped and saved.
//
// A page counts as "mirrored" as soon as it is fetched, even while it is
// still open on the stack. That is what makes cycles terminate: a link back
// to an ancestor just becomes a relative link to it.
// =============================================================================

use std::collections::HashSet;

use anyhow::Result;
use tracing::{debug, info, warn};
use url::Url;

use super::rewrite::HrefRewriter;
use super::state::{CrawlReport, VisitedSet};
use crate::address::{is_absolute, normalize, relative_link, NormalizedAddress};
use crate::html::extract_hrefs;
use crate::net::{Fetch, Response};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Inclusive bound on link hops from the seed. 0 mirrors the seed only.
    pub max_depth: usize,
}

impl CrawlConfig {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Mirrored(CrawlReport),
    /// The seed could not be mirrored (unreachable, error status,
    /// redirected off-domain, or beyond the depth bound).
    InvalidUrl,
}

// What happened when we asked for a page
enum Attempt {
    // Already mirrored in this session, safe to link to
    Known,
    // Not mirrored: too deep, or the fetch failed
    Refused,
    // Freshly fetched, its links still need walking
    Fetched(Response),
}

// A page whose links are being walked
struct Page {
    // Requested address; the page is saved under its local path
    url: NormalizedAddress,
    // Address the content was served from; relative hrefs resolve against it
    base: NormalizedAddress,
    // Depth at which this page's links are attempted
    link_depth: usize,
    hrefs: std::vec::IntoIter<String>,
    rewriter: HrefRewriter,
    // Link waiting for the page on top of this one to be saved
    pending: Option<PendingLink>,
}

struct PendingLink {
    href: String,
    target: NormalizedAddress,
}

impl Page {
    fn open(url: NormalizedAddress, response: Response, link_depth: usize) -> Result<Self> {
        let hrefs = extract_hrefs(&response.body)?;
        debug!("{} has {} link(s)", url, hrefs.len());

        Ok(Self {
            url,
            base: response.url,
            link_depth,
            hrefs: hrefs.into_iter(),
            rewriter: HrefRewriter::new(response.body),
            pending: None,
        })
    }

    fn substitute(&mut self, href: &str, replacement: &str) {
        if !self.rewriter.replace_next(href, replacement) {
            debug!("No literal href=\"{}\" left to rewrite on {}", href, self.url);
        }
    }
}

/// One top-level download: borrowed config, session state and collaborators.
pub struct Crawler<'a, F: ?Sized, S: ?Sized> {
    config: &'a CrawlConfig,
    visited: &'a mut VisitedSet,
    fetcher: &'a F,
    store: &'a S,
    report: CrawlReport,
    // Addresses whose fetch failed during this download; never retried
    failed: HashSet<String>,
}

impl<'a, F, S> Crawler<'a, F, S>
where
    F: Fetch + ?Sized,
    S: Store + ?Sized,
{
    pub fn new(
        config: &'a CrawlConfig,
        visited: &'a mut VisitedSet,
        fetcher: &'a F,
        store: &'a S,
    ) -> Self {
        Self {
            config,
            visited,
            fetcher,
            store,
            report: CrawlReport::default(),
            failed: HashSet::new(),
        }
    }

    /// Mirrors `address` and everything reachable from it within the depth
    /// bound.
    ///
    /// Unreachable seeds are reported as [`DownloadOutcome::InvalidUrl`];
    /// the `Err` case is reserved for storage or parsing failures.
    pub async fn download(mut self, depth: usize, address: &str) -> Result<DownloadOutcome> {
        let url = normalize(address);
        self.report = CrawlReport::new(&url);

        if self.try_download(depth, url).await? {
            Ok(DownloadOutcome::Mirrored(self.report))
        } else {
            Ok(DownloadOutcome::InvalidUrl)
        }
    }

    // Returns true if `url` is now mirrored (and safe to link to relatively)
    async fn try_download(&mut self, depth: usize, url: NormalizedAddress) -> Result<bool> {
        let response = match self.attempt(depth, &url).await {
            Attempt::Known => return Ok(true),
            Attempt::Refused => return Ok(false),
            Attempt::Fetched(response) => response,
        };

        let mut stack = vec![Page::open(url, response, depth.saturating_add(1))?];

        while let Some(page) = stack.last_mut() {
            match page.hrefs.next() {
                Some(href) => {
                    if let Some(child) = self.process_link(page, href).await? {
                        stack.push(child);
                    }
                }
                None => {
                    // Every link settled: save it and settle the parent's link to it
                    if let Some(done) = stack.pop() {
                        self.save(done).await?;

                        if let Some(parent) = stack.last_mut() {
                            if let Some(pending) = parent.pending.take() {
                                self.link_locally(parent, &pending.href, &pending.target);
                            }
                        }
                    }
                }
            }
        }

        Ok(true)
    }

    async fn attempt(&mut self, depth: usize, url: &NormalizedAddress) -> Attempt {
        if self.visited.contains(url) {
            debug!("Already mirrored {}", url);
            return Attempt::Known;
        }

        if depth > self.config.max_depth {
            debug!("Not descending into {}: depth {} > {}", url, depth, self.config.max_depth);
            return Attempt::Refused;
        }

        if self.failed.contains(url.as_str()) {
            debug!("Not retrying {}", url);
            return Attempt::Refused;
        }

        match self.fetcher.fetch(url).await {
            Ok(response) => {
                self.visited.insert(url);
                Attempt::Fetched(response)
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                self.failed.insert(url.as_str().to_string());
                Attempt::Refused
            }
        }
    }

    // Handles one href of `page`
    //
    // Returns the target page when it was just fetched: the caller pushes it
    // and this link is settled once that page is saved.
    async fn process_link(&mut self, page: &mut Page, href: String) -> Result<Option<Page>> {
        let Some(resolved) = resolve_href(&page.base, &href) else {
            debug!("Leaving foreign link {} on {}", href, page.url);
            self.report.foreign_links += 1;
            return Ok(None);
        };

        let target = normalize(&resolved);

        match self.attempt(page.link_depth, &target).await {
            Attempt::Known => {
                self.link_locally(page, &href, &target);
                Ok(None)
            }
            Attempt::Refused => {
                page.substitute(&href, &resolved);
                self.report.absolute_links += 1;
                Ok(None)
            }
            Attempt::Fetched(response) => {
                let child = Page::open(target.clone(), response, page.link_depth.saturating_add(1))?;
                page.pending = Some(PendingLink { href, target });
                Ok(Some(child))
            }
        }
    }

    fn link_locally(&mut self, page: &mut Page, href: &str, target: &NormalizedAddress) {
        let link = relative_link(&target.local_path(), &page.url.local_path());
        page.substitute(href, &link);
        self.report.local_links += 1;
    }

    async fn save(&mut self, page: Page) -> Result<()> {
        let path = page.url.local_path();
        let body = page.rewriter.finish();

        self.store.save(&path, &body).await?;
        info!("Mirrored {} -> {}", page.url, path);

        self.report.pages.push(path);
        Ok(())
    }
}

// Turns an href into the absolute address we would mirror
//
// Returns None for links we leave alone: links that name another domain
// (absolute ones including mailto: and javascript:, and scheme-relative
// "//host/..." ones), and relative links that cannot be resolved.
fn resolve_href(base: &NormalizedAddress, href: &str) -> Option<String> {
    let absolute = is_absolute(href);

    // A scheme-relative href names its host, so it gets the same-domain rule too
    if (absolute || href.starts_with("//")) && normalize(href).domain() != base.domain() {
        return None;
    }

    if absolute {
        return Some(href.to_string());
    }

    // Url::join percent-encodes what it resolves ("café" -> "caf%C3%A9");
    // normalize decodes it again, so only the degraded href text differs
    match Url::parse(base.as_str()).and_then(|base| base.join(href)) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            debug!("Cannot resolve {} against {}: {}", href, base, e);
            None
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Crawler<'a, F, S> with lifetimes?
//    - The crawler only borrows things owned by the session
//    - &'a mut VisitedSet means "exclusive access for as long as the crawler
//      lives", so nothing else can touch the set during a crawl
//
// 2. What does F: ?Sized mean?
//    - By default generic types must have a known size
//    - ?Sized relaxes that, so a &dyn Fetch works as well as a concrete type
//
// 3. What is let ... else?
//    - let Some(x) = expr else { return ... };
//    - Binds x if the pattern matches, otherwise runs the else block,
//      which must leave the function (return, continue, break)
//
// 4. Why a Vec as a stack instead of recursion?
//    - Recursive async functions need boxing in Rust
//    - And every recursive call uses real stack space; a Vec lives on the heap
// -----------------------------------------------------------------------------
