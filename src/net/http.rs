// src/net/http.rs
// =============================================================================
// Fetches pages over HTTP(S) with reqwest.
//
// Key behavior:
// - Follows redirects (up to 10), like a browser would
// - A redirect that lands on a different domain is a failure: we only
//   mirror the site we were asked to mirror
// - Anything other than a 2xx status is a failure
// =============================================================================

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use tracing::debug;

use super::{Fetch, FetchError, Response};
use crate::address::NormalizedAddress;

const MAX_REDIRECTS: usize = 10;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a fetcher whose requests give up after `timeout`
    //
    // We reuse this client for every request (connection pooling)
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &NormalizedAddress) -> Result<Response, FetchError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(url.scheme().to_string()));
        }

        let response = self.client.get(url.as_str()).send().await?;

        // response.url() is the address after all redirects were followed
        let resolved = NormalizedAddress::parse(response.url().as_str());
        if resolved.domain() != url.domain() {
            return Err(FetchError::CrossDomain {
                requested: url.to_string(),
                resolved: resolved.to_string(),
            });
        }

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Fetched {} ({} bytes) from {}", url, body.len(), resolved);

        Ok(Response {
            url: resolved,
            body,
        })
    }
}
