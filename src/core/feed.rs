//! Feed retrieval abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Supplies the raw text of the NAV feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self) -> Result<String>;
}
