pub mod domain;
pub mod extract;
pub mod fetch;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "https://api.tradingeconomics.com";
    pub const DEFAULT_MIN_INTERVAL_MS: u64 = 1000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_key: Option<String>,
        pub base_url: String,
        pub min_interval: Duration,
        pub timeout: Option<Duration>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let min_interval_ms = match std::env::var("TRADING_ECONOMICS_MIN_INTERVAL_MS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid TRADING_ECONOMICS_MIN_INTERVAL_MS: {s}"))?,
                Err(_) => DEFAULT_MIN_INTERVAL_MS,
            };

            let timeout = match std::env::var("TRADING_ECONOMICS_TIMEOUT_SECS") {
                Ok(s) => Some(Duration::from_secs(
                    s.trim()
                        .parse::<u64>()
                        .with_context(|| format!("invalid TRADING_ECONOMICS_TIMEOUT_SECS: {s}"))?,
                )),
                Err(_) => None,
            };

            Ok(Self {
                api_key: std::env::var("TRADING_ECONOMICS_API_KEY")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                base_url: std::env::var("TRADING_ECONOMICS_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                min_interval: Duration::from_millis(min_interval_ms),
                timeout,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_api_key(&self) -> anyhow::Result<&str> {
            self.api_key
                .as_deref()
                .context("TRADING_ECONOMICS_API_KEY is required")
        }
    }

}
