//! Parser for the AMFI `NAVAll.txt` feed.
//!
//! The feed is a CR-LF separated text document. Lines containing `;` are
//! fund records; the other non-empty lines are headers that set the category
//! or the fund house for the records below them:
//!
//! ```text
//! Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;...
//!
//! Open Ended Schemes(Equity Scheme - Large Cap Fund)
//!
//! ABC Mutual Fund
//!
//! 100001;INF000;INF001;Sample Growth Fund;15.234;15.100;15.300;01-Jan-2024
//! ```

use crate::core::fund::Fund;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, warn};

/// Number of positional fields in a record line.
pub const RECORD_FIELDS: usize = 8;

const LINE_SEPARATOR: &str = "\r\n";
const FIELD_SEPARATOR: char = ';';
const CATEGORY_PREFIXES: [&str; 2] = ["Open Ended", "Close Ended"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record line has {found} fields, expected at least {expected}")]
    TooFewFields { expected: usize, found: usize },
}

/// Classification of a single feed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Empty,
    /// The first record line of the feed, carrying the column names.
    ColumnHeader,
    Category(&'a str),
    FundHouse(&'a str),
    Record(&'a str),
}

/// Context carried from header lines to the record lines that follow them.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub category: String,
    pub fund_house: String,
    column_header_seen: bool,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies one physical line and updates the carried context.
    ///
    /// The returned slices borrow the trimmed line.
    pub fn classify<'a>(&mut self, line: &'a str) -> Line<'a> {
        let line = line.trim();
        if line.is_empty() {
            return Line::Empty;
        }

        if line.contains(FIELD_SEPARATOR) {
            if !self.column_header_seen {
                self.column_header_seen = true;
                return Line::ColumnHeader;
            }
            return Line::Record(line);
        }

        if CATEGORY_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
        {
            self.category = line.to_string();
            Line::Category(line)
        } else {
            self.fund_house = line.to_string();
            Line::FundHouse(line)
        }
    }
}

/// Everything extracted from one feed document.
#[derive(Debug, Clone, Default)]
pub struct NavData {
    pub funds: HashMap<String, Fund>,
    /// Category headers in feed order, repeats included.
    pub categories: Vec<String>,
    /// Fund house headers in order of first appearance.
    pub fund_houses: Vec<String>,
    /// Record lines rejected for having too few fields.
    pub skipped_lines: usize,
}

/// Parses a complete feed document.
///
/// Malformed record lines are skipped and counted in
/// [`NavData::skipped_lines`]; they never abort the parse.
pub fn parse(raw: &str) -> NavData {
    let mut context = ParseContext::new();
    let mut data = NavData::default();
    let mut fund_houses = Vec::new();

    for (index, line) in raw.split(LINE_SEPARATOR).enumerate() {
        match context.classify(line) {
            Line::Empty | Line::ColumnHeader => {}
            Line::Category(category) => data.categories.push(category.to_string()),
            Line::FundHouse(house) => fund_houses.push(house.to_string()),
            Line::Record(record) => {
                match build_fund(record, &context.category, &context.fund_house) {
                    Ok(fund) => {
                        data.funds.insert(fund.code.clone(), fund);
                    }
                    Err(e) => {
                        warn!(line = index + 1, error = %e, "Skipping malformed record line");
                        data.skipped_lines += 1;
                    }
                }
            }
        }
    }

    data.fund_houses = dedup(&fund_houses);
    debug!(
        funds = data.funds.len(),
        categories = data.categories.len(),
        fund_houses = data.fund_houses.len(),
        skipped = data.skipped_lines,
        "Parsed NAV feed"
    );
    data
}

/// Builds a fund from a `;` separated record line.
///
/// Unparseable numeric fields are left at zero. Fields past the eighth are
/// ignored.
pub fn build_fund(line: &str, category: &str, fund_house: &str) -> Result<Fund, RecordError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < RECORD_FIELDS {
        return Err(RecordError::TooFewFields {
            expected: RECORD_FIELDS,
            found: fields.len(),
        });
    }

    let code = fields[0];
    Ok(Fund {
        code: code.to_string(),
        isin: fields[1].to_string(),
        isin_reinvestment: fields[2].to_string(),
        name: fields[3].to_string(),
        fund_house: fund_house.to_string(),
        category: category.to_string(),
        nav: parse_value(fields[4], "nav", code),
        repurchase_value: parse_value(fields[5], "repurchase_value", code),
        sale_price: parse_value(fields[6], "sale_price", code),
        date: fields[7].to_string(),
    })
}

fn parse_value(raw: &str, field: &str, code: &str) -> f64 {
    raw.parse::<f64>().unwrap_or_else(|e| {
        debug!(code, field, value = raw, error = %e, "Defaulting unparseable value to zero");
        0.0
    })
}

/// Removes repeated items, keeping the first occurrence of each.
pub fn dedup<T>(items: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}
