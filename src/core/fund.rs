//! Fund record published in the AMFI NAV feed

use serde::{Deserialize, Serialize};

/// One scheme's latest valuation as published by AMFI.
///
/// `fund_house` and `category` are not part of the record line itself; they
/// are inherited from the nearest header lines above it in the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub code: String,
    pub isin: String,
    pub isin_reinvestment: String,
    pub name: String,
    pub fund_house: String,
    pub category: String,
    pub nav: f64,
    pub repurchase_value: f64,
    pub sale_price: f64,
    /// Valuation date exactly as published, e.g. `01-Jan-2024`.
    pub date: String,
}
