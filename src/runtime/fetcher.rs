use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, String>;
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, String>;
}

/// Fetcher for the Météo-France public API: every request carries the
/// `apikey` header and an overall timeout.
pub struct HttpFetcher {
    client: Client,
    api_key: String,
}

impl HttpFetcher {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    async fn get(&self, url: &str) -> Result<Response, String> {
        tracing::debug!("Fetching {url}");
        let response = self
            .client
            .get(url)
            .header("accept", "*/*")
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| format!("Network error fetching {url}: {e}"))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(format!(
                "Invalid API token (401 Unauthorized) fetching {url}"
            ));
        }
        if !response.status().is_success() {
            return Err(format!(
                "HTTP error {} fetching {url}",
                response.status().as_u16()
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|e| format!("Error reading response body from {url}: {e}"))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| format!("Error reading response body from {url}: {e}"))?;
        Ok(bytes.to_vec())
    }
}
