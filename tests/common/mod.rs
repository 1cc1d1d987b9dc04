#![allow(dead_code)]
use async_trait::async_trait;
use bra_ingest::runtime::fetcher::Fetcher;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(filename: &str) -> String {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Fetcher serving canned responses keyed by URL.
pub struct MockFetcher {
    responses: Mutex<HashMap<String, String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_response(&self, url: &str, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| format!("No canned response for {url}"))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        self.fetch(url).await.map(String::into_bytes)
    }
}
