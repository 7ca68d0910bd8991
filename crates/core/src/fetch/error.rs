use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    /// The request could not be built (bad base URL, unusable header value).
    InvalidRequest(String),
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    Decode(serde_json::Error),
}

impl FetchError {
    /// Whether the failure happened before any network I/O.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(detail) => write!(f, "invalid request: {detail}"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Status { status, body } => write!(f, "upstream HTTP {status}: {body}"),
            Self::Decode(err) => write!(f, "failed to decode upstream response: {err}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    /// The URL is dropped because the categories endpoint carries the api key in its query.
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
