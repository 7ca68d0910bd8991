use crate::config::Settings;
use crate::domain::indicator::IndicatorRecord;
use crate::domain::stock::{
    SearchCategory, SnapshotBatch, SnapshotSource, StockDescription, StockSnapshot,
};
use crate::fetch::error::FetchError;
use crate::fetch::mock::mock_snapshots;
use crate::fetch::sanitize::sanitize_input;
use crate::fetch::throttle::ThrottleGate;
use crate::fetch::transport::{ApiRequest, HttpTransport, Transport};
use anyhow::Context;
use reqwest::header::HeaderValue;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Text the upstream puts in a snapshot's `Country` field when the account
/// tier does not cover the requested data.
pub const TIER_LIMIT_MARKER: &str = "No Access to this country as free user";

const GUEST_QUERY: &str = "c=guest:guest&f=json";

/// One or many country names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryInput(Vec<String>);

impl From<&str> for CountryInput {
    fn from(country: &str) -> Self {
        Self(vec![country.to_string()])
    }
}

impl From<String> for CountryInput {
    fn from(country: String) -> Self {
        Self(vec![country])
    }
}

impl From<Vec<String>> for CountryInput {
    fn from(countries: Vec<String>) -> Self {
        Self(countries)
    }
}

impl From<Vec<&str>> for CountryInput {
    fn from(countries: Vec<&str>) -> Self {
        Self(countries.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for CountryInput {
    fn from(countries: &[&str]) -> Self {
        Self(countries.iter().map(|c| c.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CountryInput {
    fn from(countries: [&str; N]) -> Self {
        Self(countries.iter().map(|c| c.to_string()).collect())
    }
}

/// Outcome of the request for a single country.
#[derive(Debug)]
pub struct CountryFetch {
    pub country: String,
    pub outcome: Result<Vec<IndicatorRecord>, FetchError>,
}

#[derive(Debug)]
pub struct FetchClient<T = HttpTransport> {
    transport: T,
    gate: ThrottleGate,
    base_url: Url,
    api_key: String,
}

impl FetchClient<HttpTransport> {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_api_key()?.to_string();
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("invalid base url: {}", settings.base_url))?;
        let transport =
            HttpTransport::new(settings.timeout).context("failed to build http transport")?;

        Self::new(transport, base_url, api_key, settings.min_interval)
            .context("failed to build fetch client")
    }
}

impl<T: Transport> FetchClient<T> {
    pub fn new(
        transport: T,
        base_url: Url,
        api_key: impl Into<String>,
        min_interval: Duration,
    ) -> Result<Self, FetchError> {
        let api_key = api_key.into();
        HeaderValue::from_str(&api_key).map_err(|_| {
            FetchError::InvalidRequest("api key is not a valid header value".to_string())
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidRequest(format!(
                "base url cannot carry a path: {base_url}"
            )));
        }

        Ok(Self {
            transport,
            gate: ThrottleGate::new(min_interval),
            base_url,
            api_key,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Indicator records for every country that answered, in request order.
    ///
    /// Countries whose request fails are left out of the result.
    pub async fn get_country_data(
        &self,
        countries: impl Into<CountryInput>,
    ) -> Result<Vec<IndicatorRecord>, FetchError> {
        let fetches = self.get_country_data_detailed(countries).await?;
        Ok(fetches
            .into_iter()
            .filter_map(|f| f.outcome.ok())
            .flatten()
            .collect())
    }

    /// One sequential request per sanitized country, with each outcome kept.
    /// Countries that sanitize to an empty string are skipped without a request.
    pub async fn get_country_data_detailed(
        &self,
        countries: impl Into<CountryInput>,
    ) -> Result<Vec<CountryFetch>, FetchError> {
        let CountryInput(countries) = countries.into();

        let mut requests = Vec::with_capacity(countries.len());
        for raw in &countries {
            let country = sanitize_input(raw);
            if country.is_empty() {
                tracing::debug!(input = %raw, "country is blank after sanitizing; skipping");
                continue;
            }
            let request = self.keyed_request(&["country", country.as_str()], None)?;
            requests.push((country, request));
        }

        let total = requests.len();
        let mut out = Vec::with_capacity(total);
        for (idx, (country, request)) in requests.into_iter().enumerate() {
            let outcome = self.get::<Vec<IndicatorRecord>>(request).await;
            match &outcome {
                Ok(records) => {
                    tracing::debug!(idx, total, %country, records = records.len(), "country fetched")
                }
                Err(err) => {
                    tracing::warn!(idx, total, %country, error = %err, "country fetch failed; skipping")
                }
            }
            out.push(CountryFetch { country, outcome });
        }

        Ok(out)
    }

    pub async fn list_search_terms(&self) -> Result<Vec<SearchCategory>, FetchError> {
        let query = format!("c={}", self.api_key);
        let request = self.keyed_request(&["search", "categories"], Some(&query))?;
        self.get(request).await
    }

    pub async fn get_stock_descriptions(
        &self,
        symbols: &str,
    ) -> Result<Vec<StockDescription>, FetchError> {
        let symbols = sanitize_input(symbols);
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let request =
            self.guest_request(&["markets", "stockdescriptions", "symbol", symbols.as_str()])?;
        self.get(request).await
    }

    /// Price snapshots for `symbols`, replaced by synthetic records when the
    /// upstream flags a tier limitation or the request fails.
    pub async fn get_stock_snapshot(&self, symbols: &str) -> Result<SnapshotBatch, FetchError> {
        let symbols = sanitize_input(symbols);
        if symbols.is_empty() {
            return Ok(SnapshotBatch {
                source: SnapshotSource::Live,
                records: Vec::new(),
            });
        }

        let request = self.guest_request(&["markets", "symbol", symbols.as_str()])?;
        let source = match self.get::<Value>(request).await {
            Ok(raw) if is_tier_limited(&raw) => {
                tracing::warn!(%symbols, "snapshot limited by account tier; using mock data");
                SnapshotSource::TierLimited
            }
            Ok(raw) => match serde_json::from_value::<Vec<StockSnapshot>>(raw) {
                Ok(records) => {
                    return Ok(SnapshotBatch {
                        source: SnapshotSource::Live,
                        records,
                    })
                }
                Err(err) => {
                    tracing::warn!(
                        %symbols,
                        error = %err,
                        "snapshot response malformed; using mock data"
                    );
                    SnapshotSource::TransportFallback
                }
            },
            Err(err) => {
                tracing::warn!(%symbols, error = %err, "snapshot fetch failed; using mock data");
                SnapshotSource::TransportFallback
            }
        };

        Ok(SnapshotBatch {
            source,
            records: mock_snapshots(&symbols, &mut rand::thread_rng()),
        })
    }

    async fn get<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, FetchError> {
        self.gate.acquire().await;
        tracing::debug!(path = request.url.path(), "upstream request");
        let raw = self.transport.get_json(request).await?;
        Ok(serde_json::from_value(raw)?)
    }

    fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::InvalidRequest(format!("base url cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query);
        Ok(url)
    }

    fn keyed_request(
        &self,
        segments: &[&str],
        query: Option<&str>,
    ) -> Result<ApiRequest, FetchError> {
        Ok(ApiRequest {
            url: self.endpoint(segments, query)?,
            authorization: Some(self.api_key.clone()),
        })
    }

    fn guest_request(&self, segments: &[&str]) -> Result<ApiRequest, FetchError> {
        Ok(ApiRequest {
            url: self.endpoint(segments, Some(GUEST_QUERY))?,
            authorization: None,
        })
    }
}

fn is_tier_limited(raw: &Value) -> bool {
    raw.get(0)
        .and_then(|first| first.get("Country"))
        .and_then(Value::as_str)
        .is_some_and(|country| country.contains(TIER_LIMIT_MARKER))
}
