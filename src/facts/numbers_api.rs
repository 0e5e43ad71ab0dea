use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::facts::FactFetcher;
use crate::{ClassifyError, ClassifyResult};

/// Facts are short sentences; larger bodies are treated as a failed lookup
pub const MAX_FACT_BYTES: usize = 4 * 1024;

/// Fact fetcher backed by a numbersapi.com compatible service
pub struct NumbersApiFetcher {
    /// Base URL, always ending in a slash
    base_url: Url,
    /// HTTP client carrying the lookup timeout
    client: reqwest::Client,
}

impl NumbersApiFetcher {
    /// Create a new fetcher; every lookup is bounded by `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> ClassifyResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClassifyError::UrlError(format!("Invalid URL: {}", e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ClassifyError::UrlError(format!(
                "Invalid URL: {} cannot be a base",
                base_url
            )));
        }

        // Url::join replaces the last segment unless the path ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::HttpError(format!("Failed to build client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub(crate) fn fact_url(&self, number: u32) -> ClassifyResult<Url> {
        self.base_url
            .join(&format!("{}/math", number))
            .map_err(|e| ClassifyError::UrlError(format!("Invalid URL: {}", e)))
    }
}

#[async_trait]
impl FactFetcher for NumbersApiFetcher {
    async fn fetch(&self, number: u32) -> ClassifyResult<String> {
        let url = self.fact_url(number)?;

        let mut response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ClassifyError::HttpError(format!("Failed to fetch fact: {}", e)))?;

        if !response.status().is_success() {
            return Err(ClassifyError::HttpError(format!(
                "Failed to fetch fact: HTTP status {}",
                response.status()
            )));
        }

        if response.content_length().unwrap_or(0) > MAX_FACT_BYTES as u64 {
            return Err(ClassifyError::HttpError(format!(
                "Fact exceeds {} bytes",
                MAX_FACT_BYTES
            )));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ClassifyError::HttpError(format!("Failed to read response body: {}", e)))?
        {
            if body.len() + chunk.len() > MAX_FACT_BYTES {
                return Err(ClassifyError::HttpError(format!(
                    "Fact exceeds {} bytes",
                    MAX_FACT_BYTES
                )));
            }
            body.extend_from_slice(&chunk);
        }

        let fact = String::from_utf8_lossy(&body).into_owned();

        if fact.trim().is_empty() {
            return Err(ClassifyError::HttpError("Empty fact".to_string()));
        }

        Ok(fact)
    }
}
