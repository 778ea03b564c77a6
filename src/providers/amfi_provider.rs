use crate::core::FeedSource;
use crate::core::config::AmfiProviderConfig;
use crate::providers::util::send_with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Downloads the `NAVAll.txt` feed published by AMFI.
pub struct AmfiFeedProvider {
    url: String,
    client: reqwest::Client,
}

impl AmfiFeedProvider {
    pub fn new(config: &AmfiProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }
}

#[async_trait]
impl FeedSource for AmfiFeedProvider {
    async fn fetch_feed(&self) -> Result<String> {
        debug!("Requesting NAV feed from {}", self.url);

        let response = send_with_retry(
            || self.client.get(&self.url).send(),
            RETRIES,
            RETRY_DELAY,
        )
        .await
        .with_context(|| format!("Failed to download NAV feed from {}", self.url))?;

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read NAV feed body from {}", self.url))?;

        if body.trim().is_empty() {
            return Err(anyhow!("Received empty NAV feed from {}", self.url));
        }

        debug!("Received {} bytes of NAV feed", body.len());
        Ok(body)
    }
}
