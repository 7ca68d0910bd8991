pub mod profile;

pub use profile::{ExtractionProfile, Matcher, Metric, ProfileKind};

use crate::domain::indicator::IndicatorRecord;
use crate::domain::metrics::{CountryMetrics, MetricValue};
use std::collections::HashMap;

const UNKNOWN_COUNTRY: &str = "Unknown";

/// Group records by country (first-seen order) and lift the first record
/// matching each profile target into that country's metrics.
pub fn extract_country_metrics(
    records: &[IndicatorRecord],
    profile: &ExtractionProfile,
) -> Vec<CountryMetrics> {
    let mut order: Vec<(&str, Vec<&IndicatorRecord>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let country = record
            .country
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_COUNTRY);
        let slot = *index.entry(country).or_insert_with(|| {
            order.push((country, Vec::new()));
            order.len() - 1
        });
        order[slot].1.push(record);
    }

    order
        .into_iter()
        .map(|(country, group)| {
            let mut metrics = CountryMetrics::new(country);
            for (metric, matcher) in &profile.targets {
                let slot = metric.slot(&mut metrics);
                if slot.is_some() {
                    continue;
                }
                *slot = group
                    .iter()
                    .find(|r| r.category.as_deref().is_some_and(|c| matcher.matches(c)))
                    .map(|r| MetricValue::from(*r));
            }
            metrics
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::IndicatorValue;
    use serde_json::json;

    fn records(v: serde_json::Value) -> Vec<IndicatorRecord> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn two_countries_with_inflation_only() {
        let input = records(json!([
            {"Country": "Mexico", "Category": "Inflation Rate", "LatestValue": 4.4,
             "Unit": "percent", "LatestValueDate": "2024-05-31T00:00:00"},
            {"Country": "Sweden", "Category": "Inflation Rate", "LatestValue": 2.6,
             "Unit": "percent", "LatestValueDate": "2024-05-31T00:00:00"}
        ]));

        let out = extract_country_metrics(&input, &ExtractionProfile::labels());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].country, "Mexico");
        assert_eq!(out[1].country, "Sweden");
        for m in &out {
            assert!(m.inflation_rate.is_some());
            assert!(m.cpi.is_none());
            assert!(m.corruption_index.is_none());
            assert!(m.corruption_rank.is_none());
        }

        let inflation = out[1].inflation_rate.as_ref().unwrap();
        assert_eq!(inflation.value, Some(IndicatorValue::Number(2.6)));
        assert_eq!(inflation.unit.as_deref(), Some("percent"));
        assert_eq!(inflation.date.as_deref(), Some("2024-05-31T00:00:00"));
        assert_eq!(inflation.category.as_deref(), Some("Inflation Rate"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let input = records(json!([
            {"Country": "Thailand", "Category": "Corruption Rank", "LatestValue": 108},
            {"Country": "Thailand", "Category": "Consumer Price Index CPI", "LatestValue": 108.2},
            {"Country": "Mexico", "Category": "Corruption Index", "LatestValue": 31}
        ]));
        let profile = ExtractionProfile::labels();

        let first = extract_country_metrics(&input, &profile);
        let second = extract_country_metrics(&input, &profile);
        assert_eq!(first, second);
        assert!(first[0].corruption_rank.is_some());
        assert!(first[0].cpi.is_some());
        assert!(first[1].corruption_index.is_some());
    }

    #[test]
    fn missing_country_groups_under_unknown() {
        let input = records(json!([
            {"Category": "Inflation Rate", "LatestValue": 1.0},
            {"Country": "", "Category": "Corruption Rank", "LatestValue": 5}
        ]));

        let out = extract_country_metrics(&input, &ExtractionProfile::labels());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "Unknown");
        assert!(out[0].inflation_rate.is_some());
        assert!(out[0].corruption_rank.is_some());
    }

    #[test]
    fn first_match_wins() {
        let input = records(json!([
            {"Country": "Mexico", "Category": "Inflation Rate", "LatestValue": 4.4},
            {"Country": "Mexico", "Category": "Inflation Rate", "LatestValue": 9.9}
        ]));

        let out = extract_country_metrics(&input, &ExtractionProfile::labels());
        assert_eq!(
            out[0].inflation_rate.as_ref().unwrap().value,
            Some(IndicatorValue::Number(4.4))
        );
    }

    #[test]
    fn keyword_profile_picks_inflation_and_auto_exports() {
        let input = records(json!([
            {"Country": "Mexico", "Category": "Core Inflation Rate", "LatestValue": 4.1},
            {"Country": "Mexico", "Category": "Inflation Rate", "LatestValue": 4.4},
            {"Country": "Mexico", "Category": "Auto Exports", "LatestValue": 290.1, "Unit": "Thousand"},
            {"Country": "Mexico", "Category": "Consumer Price Index CPI", "LatestValue": 134.0}
        ]));

        let out = extract_country_metrics(&input, &ExtractionProfile::keywords());
        let m = &out[0];
        assert_eq!(
            m.inflation_rate.as_ref().unwrap().category.as_deref(),
            Some("Core Inflation Rate")
        );
        assert_eq!(m.auto_exports.as_ref().unwrap().unit.as_deref(), Some("Thousand"));
        assert!(m.cpi.is_none());
    }

    #[test]
    fn empty_input_yields_no_countries() {
        assert!(extract_country_metrics(&[], &ExtractionProfile::default()).is_empty());
    }

    #[test]
    fn serializes_with_camel_case_and_nulls() {
        let input = records(json!([
            {"Country": "Sweden", "Category": "Inflation Rate", "LatestValue": 2.6}
        ]));
        let out = extract_country_metrics(&input, &ExtractionProfile::labels());
        let v = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(v["country"], "Sweden");
        assert_eq!(v["inflationRate"]["value"], 2.6);
        assert!(v["corruptionRank"].is_null());
    }
}
