//! Lodestone status page fetcher.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use super::StatusSource;

/// Browser-like UA; the Lodestone serves an interstitial to unknown clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// A stalled fetch must not delay the next scheduled tick.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status page returned HTTP {0}")]
    BadStatus(StatusCode),
}

/// Fetches the raw world status page over HTTPS.
pub struct LodestoneSource {
    client: reqwest::Client,
    url: String,
}

impl LodestoneSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl StatusSource for LodestoneSource {
    async fn fetch_page(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status()));
        }
        Ok(response.text().await?)
    }
}
