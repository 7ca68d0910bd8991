use serde::{Deserialize, Serialize};

/// One country indicator row as returned by `/country/{country}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndicatorRecord {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub latest_value: Option<IndicatorValue>,
    #[serde(default)]
    pub latest_value_date: Option<String>,
    #[serde(default)]
    pub previous_value: Option<IndicatorValue>,
    #[serde(default)]
    pub previous_value_date: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub category_group: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Upstream values are usually numeric but some indicators come back as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Number(f64),
    Text(String),
}
