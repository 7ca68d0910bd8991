use crate::domain::stock::StockSnapshot;
use chrono::{SecondsFormat, Utc};
use rand::Rng;

const BASE_PRICE: f64 = 100.0;
const PRICE_STEP: f64 = 50.0;

const KNOWN_NAMES: &[(&str, &str)] = &[
    ("aapl", "Apple Inc."),
    ("msft", "Microsoft Corporation"),
    ("goog", "Alphabet Inc."),
    ("amzn", "Amazon.com Inc."),
    ("tsla", "Tesla Inc."),
    ("nvda", "NVIDIA Corporation"),
    ("jpm", "JPMorgan Chase & Co."),
    ("jnj", "Johnson & Johnson"),
    ("v", "Visa Inc."),
    ("pg", "Procter & Gamble Co."),
];

/// Company name for a symbol such as `aapl:us`, keyed by the part before `:`.
pub fn company_name(symbol: &str) -> String {
    let ticker = symbol.split(':').next().unwrap_or(symbol).trim();
    KNOWN_NAMES
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(ticker))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("{} Corporation", ticker.to_uppercase()))
}

/// One synthetic snapshot per non-blank entry of a comma-separated symbol list.
pub fn mock_snapshots<R: Rng>(symbols: &str, rng: &mut R) -> Vec<StockSnapshot> {
    let date = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    symbols
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(idx, symbol)| {
            let last = BASE_PRICE + PRICE_STEP * idx as f64 + rng.gen_range(0.0..100.0);
            let daily_change = rng.gen_range(-5.0..5.0);
            let state = if rng.gen_bool(0.5) { "OPEN" } else { "CLOSED" };

            StockSnapshot {
                symbol: Some(symbol.to_uppercase()),
                name: Some(company_name(symbol)),
                country: Some("United States".to_string()),
                last: Some(last),
                daily_change: Some(daily_change),
                daily_percentual_change: Some(daily_change / last * 100.0),
                market_cap: Some(rng.gen_range(1.0e9..2.0e12)),
                state: Some(state.to_string()),
                date: Some(date.clone()),
            }
        })
        .collect()
}
