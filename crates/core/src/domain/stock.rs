use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCategory {
    #[serde(rename = "Categories")]
    pub categories: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StockDescription {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub subindustry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl StockDescription {
    fn symbol_key(&self) -> Option<String> {
        self.symbol.as_deref().map(str::to_lowercase)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StockSnapshot {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub last: Option<f64>,
    #[serde(default)]
    pub daily_change: Option<f64>,
    #[serde(default)]
    pub daily_percentual_change: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    Live,
    /// Upstream answered but flagged the account tier; records are synthetic.
    TierLimited,
    /// The request itself failed; records are synthetic.
    TransportFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotBatch {
    pub source: SnapshotSource,
    pub records: Vec<StockSnapshot>,
}

impl SnapshotBatch {
    pub fn is_synthetic(&self) -> bool {
        self.source != SnapshotSource::Live
    }
}

/// Split a user-entered ticker list on commas, keeping only `[A-Za-z0-9:]+` tokens.
pub fn parse_ticker_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_alphanumeric() || c == ':'))
        .map(str::to_string)
        .collect()
}

/// Returns the descriptions from `incoming` whose symbol is not yet in `existing`.
///
/// Symbols compare case-insensitively, and duplicates inside `incoming` are
/// collapsed to their first occurrence. Records without a symbol are dropped.
pub fn merge_descriptions(
    existing: &[StockDescription],
    incoming: Vec<StockDescription>,
) -> Vec<StockDescription> {
    let mut seen: HashSet<String> = existing.iter().filter_map(|d| d.symbol_key()).collect();
    incoming
        .into_iter()
        .filter(|d| match d.symbol_key() {
            Some(key) => seen.insert(key),
            None => false,
        })
        .collect()
}
