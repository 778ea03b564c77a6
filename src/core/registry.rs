//! In-memory registry of the latest parsed NAV feed.
//!
//! Each load parses into a fresh [`NavSnapshot`] and publishes it with a
//! single swap, so readers always see funds, categories and fund houses from
//! the same load.
use crate::core::feed::FeedSource;
use crate::core::fund::Fund;
use crate::core::parser::{self, NavData};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Result of one successful load.
#[derive(Debug, Clone)]
pub struct NavSnapshot {
    pub data: NavData,
    pub loaded_at: DateTime<Utc>,
}

impl NavSnapshot {
    fn sorted(mut funds: Vec<Fund>) -> Vec<Fund> {
        funds.sort_by(|a, b| a.code.cmp(&b.code));
        funds
    }

    /// All funds ordered by scheme code.
    pub fn funds(&self) -> Vec<Fund> {
        Self::sorted(self.data.funds.values().cloned().collect())
    }

    pub fn fund(&self, code: &str) -> Option<&Fund> {
        self.data.funds.get(code)
    }

    pub fn funds_by_house(&self, fund_house: &str) -> Vec<Fund> {
        Self::sorted(
            self.data
                .funds
                .values()
                .filter(|f| f.fund_house == fund_house)
                .cloned()
                .collect(),
        )
    }

    pub fn funds_by_category(&self, category: &str) -> Vec<Fund> {
        Self::sorted(
            self.data
                .funds
                .values()
                .filter(|f| f.category == category)
                .cloned()
                .collect(),
        )
    }
}

#[derive(Default)]
pub struct NavRegistry {
    current: RwLock<Option<Arc<NavSnapshot>>>,
}

impl NavRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the feed from `source` and replaces the current snapshot.
    ///
    /// A transport failure leaves the previous snapshot in place.
    pub async fn load(&self, source: &dyn FeedSource) -> Result<Arc<NavSnapshot>> {
        let raw = source
            .fetch_feed()
            .await
            .context("Failed to fetch NAV feed")?;
        Ok(self.load_from_str(&raw))
    }

    pub fn load_from_str(&self, raw: &str) -> Arc<NavSnapshot> {
        let snapshot = Arc::new(NavSnapshot {
            data: parser::parse(raw),
            loaded_at: Utc::now(),
        });
        info!(
            funds = snapshot.data.funds.len(),
            skipped = snapshot.data.skipped_lines,
            "Loaded NAV feed"
        );
        self.publish(Arc::clone(&snapshot));
        snapshot
    }

    fn publish(&self, snapshot: Arc<NavSnapshot>) {
        // A poisoned lock still holds a complete snapshot since writes are a single swap
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(snapshot);
        debug!("Published new NAV snapshot");
    }

    /// The latest published snapshot, if any load has succeeded.
    pub fn snapshot(&self) -> Option<Arc<NavSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.snapshot()
            .map(|s| s.data.categories.clone())
            .unwrap_or_default()
    }

    pub fn fund_houses(&self) -> Vec<String> {
        self.snapshot()
            .map(|s| s.data.fund_houses.clone())
            .unwrap_or_default()
    }

    pub fn funds(&self) -> Vec<Fund> {
        self.snapshot().map(|s| s.funds()).unwrap_or_default()
    }

    /// Looks up a fund by scheme code. `None` means the code is not in the feed.
    pub fn fund(&self, code: &str) -> Option<Fund> {
        self.snapshot().and_then(|s| s.fund(code).cloned())
    }

    pub fn funds_by_house(&self, fund_house: &str) -> Vec<Fund> {
        self.snapshot()
            .map(|s| s.funds_by_house(fund_house))
            .unwrap_or_default()
    }

    pub fn funds_by_category(&self, category: &str) -> Vec<Fund> {
        self.snapshot()
            .map(|s| s.funds_by_category(category))
            .unwrap_or_default()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.snapshot().map(|s| s.loaded_at)
    }
}
