use crate::domain::metrics::{CountryMetrics, MetricValue};
use std::str::FromStr;

/// A `CountryMetrics` field the extractor can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    InflationRate,
    Cpi,
    CorruptionIndex,
    CorruptionRank,
    AutoExports,
}

impl Metric {
    pub(crate) fn slot<'a>(&self, metrics: &'a mut CountryMetrics) -> &'a mut Option<MetricValue> {
        match self {
            Self::InflationRate => &mut metrics.inflation_rate,
            Self::Cpi => &mut metrics.cpi,
            Self::CorruptionIndex => &mut metrics.corruption_index,
            Self::CorruptionRank => &mut metrics.corruption_rank,
            Self::AutoExports => &mut metrics.auto_exports,
        }
    }
}

/// How a record's `Category` is tested against a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    Exact(String),
    /// Case-insensitive; every keyword must appear somewhere in the category.
    AllKeywords(Vec<String>),
}

impl Matcher {
    pub fn exact(label: &str) -> Self {
        Self::Exact(label.to_string())
    }

    pub fn keywords(words: &[&str]) -> Self {
        Self::AllKeywords(words.iter().map(|w| w.to_lowercase()).collect())
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::Exact(label) => category == label,
            Self::AllKeywords(words) => {
                let category = category.to_lowercase();
                words.iter().all(|w| category.contains(w.as_str()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileKind {
    #[default]
    Labels,
    Keywords,
}

impl FromStr for ProfileKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "labels" => Ok(Self::Labels),
            "keywords" => Ok(Self::Keywords),
            other => anyhow::bail!("unknown extraction profile: {other}"),
        }
    }
}

/// Ordered set of targets; the first matching record wins for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionProfile {
    pub targets: Vec<(Metric, Matcher)>,
}

impl ExtractionProfile {
    pub fn new(targets: Vec<(Metric, Matcher)>) -> Self {
        Self { targets }
    }

    /// Exact category labels for inflation, CPI and the corruption metrics.
    pub fn labels() -> Self {
        Self::new(vec![
            (Metric::InflationRate, Matcher::exact("Inflation Rate")),
            (Metric::Cpi, Matcher::exact("Consumer Price Index CPI")),
            (Metric::CorruptionIndex, Matcher::exact("Corruption Index")),
            (Metric::CorruptionRank, Matcher::exact("Corruption Rank")),
        ])
    }

    /// Keyword matching for inflation and auto exports.
    pub fn keywords() -> Self {
        Self::new(vec![
            (Metric::InflationRate, Matcher::keywords(&["inflation"])),
            (Metric::AutoExports, Matcher::keywords(&["auto", "export"])),
        ])
    }

    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Labels => Self::labels(),
            ProfileKind::Keywords => Self::keywords(),
        }
    }
}

impl Default for ExtractionProfile {
    fn default() -> Self {
        Self::labels()
    }
}
