// src/testing.rs
// =============================================================================
// In-memory collaborators for tests: a fake internet and a fake disk.
// =============================================================================

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::address::NormalizedAddress;
use crate::net::{Fetch, FetchError, Response};
use crate::store::Store;

/// Serves fixed pages keyed by canonical address and records every request.
pub struct FakeInternet {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeInternet {
    pub fn new<'a>(pages: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(address, body)| (address.to_string(), body.to_string()))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for FakeInternet {
    async fn fetch(&self, url: &NormalizedAddress) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.pages.get(url.as_str()) {
            Some(body) => Ok(Response {
                url: url.clone(),
                body: body.clone(),
            }),
            None => Err(FetchError::Status(404)),
        }
    }
}

/// Keeps saved pages in memory, keyed by local path.
#[derive(Default)]
pub struct FakeStore {
    files: Mutex<BTreeMap<String, String>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> BTreeMap<String, String> {
        self.files.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for FakeStore {
    async fn save(&self, path: &str, content: &str) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        Ok(())
    }
}

/// Builds the expected file map from (path, content) pairs.
pub fn catalog<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> BTreeMap<String, String> {
    files
        .into_iter()
        .map(|(path, content)| (path.to_string(), content.to_string()))
        .collect()
}
