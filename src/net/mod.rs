// src/net/mod.rs
// =============================================================================
// The fetch side of the mirror: "give me the page at this address".
//
// The crawler only talks to the Fetch trait, so tests can swap in an
// in-memory internet and the real binary uses HttpFetcher (reqwest).
//
// Submodules:
// - http: the reqwest-backed implementation
// =============================================================================

mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::address::NormalizedAddress;

pub use http::HttpFetcher;

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct Response {
    /// Where the content was finally served from (after redirects).
    pub url: NormalizedAddress,
    pub body: String,
}

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, unparseable address...
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("unsupported scheme {0:?}")]
    UnsupportedScheme(String),

    /// The request was redirected off the requested domain.
    #[error("redirected from {requested} to {resolved}")]
    CrossDomain { requested: String, resolved: String },
}

#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &NormalizedAddress) -> Result<Response, FetchError>;
}
