use crate::domain::indicator::{IndicatorRecord, IndicatorValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub value: Option<IndicatorValue>,
    pub unit: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
}

impl From<&IndicatorRecord> for MetricValue {
    fn from(record: &IndicatorRecord) -> Self {
        Self {
            value: record.latest_value.clone(),
            unit: record.unit.clone(),
            date: record.latest_value_date.clone(),
            category: record.category.clone(),
        }
    }
}

/// Per-country view derived from a flat indicator list. Recomputed on every load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryMetrics {
    pub country: String,
    pub inflation_rate: Option<MetricValue>,
    pub cpi: Option<MetricValue>,
    pub corruption_index: Option<MetricValue>,
    pub corruption_rank: Option<MetricValue>,
    pub auto_exports: Option<MetricValue>,
}

impl CountryMetrics {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Default::default()
        }
    }
}
