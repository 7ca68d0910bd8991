use crate::fetch::error::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

/// A fully built outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: Url,
    pub authorization: Option<String>,
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, request: ApiRequest) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| FetchError::InvalidRequest(format!("failed to build http client: {err}")))?;
        Ok(Self { http })
    }

    fn headers(request: &ApiRequest) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &request.authorization {
            let value = HeaderValue::from_str(key).map_err(|_| {
                FetchError::InvalidRequest("api key is not a valid header value".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, request: ApiRequest) -> Result<Value, FetchError> {
        let headers = Self::headers(&request)?;

        let res = self
            .http
            .get(request.url)
            .headers(headers)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str::<Value>(&text)?)
    }
}
