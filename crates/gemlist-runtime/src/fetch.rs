//! HTTP boundary of the listing client.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use gemlist_engine::envelope_failure;
use gemlist_types::{CatalogKind, QueryParams};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Parameters in the query string
    #[default]
    Get,
    /// Parameters as a JSON body
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

/// One listing request as handed to a `Fetcher`
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub kind: CatalogKind,
    pub path: String,
    pub method: Method,
    pub params: QueryParams,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection, DNS or TLS failure
    Transport(String),
    Timeout,
    /// Non-2xx response
    Status { code: u16, body: String },
    /// Envelope answered `success: false`
    Rejected { message: String },
    /// Body was not JSON
    Decode(String),
}

impl FetchError {
    /// Whether re-issuing the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) | FetchError::Timeout | FetchError::Rejected { .. } => true,
            FetchError::Status { code, .. } => *code == 429 || (500..=599).contains(code),
            FetchError::Decode(_) => false,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "network error: {}", msg),
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Status { code, body } if body.is_empty() => write!(f, "http {}", code),
            FetchError::Status { code, body } => write!(f, "http {}: {}", code, body),
            FetchError::Rejected { message } => write!(f, "request rejected: {}", message),
            FetchError::Decode(msg) => write!(f, "invalid response body: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can turn a listing request into a raw JSON response
pub trait Fetcher: Send + Sync {
    fn fetch(&self, request: FetchRequest) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// `Fetcher` over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gemlist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, FetchError> {
        Self::new(api.base_url.clone(), Duration::from_secs(api.timeout_secs))
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<Value, FetchError> {
        let url = self.url(&request.path);
        debug!(kind = %request.kind, method = %request.method, url = %url, "fetching listing");

        let builder = match request.method {
            Method::Get => self.http.get(&url).query(&request.params.to_query_pairs()),
            Method::Post => self.http.post(&url).json(&request.params.to_json()),
        };
        let builder = match &request.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let res = builder.send().await.map_err(map_reqwest_error)?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), url = %url, "listing request failed");
            return Err(FetchError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let raw: Value = res
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        if let Some(message) = envelope_failure(&raw) {
            return Err(FetchError::Rejected { message });
        }
        Ok(raw)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(FetchError::Timeout.is_retryable());
        assert!(FetchError::Transport("reset".to_string()).is_retryable());
        assert!(
            FetchError::Rejected {
                message: "busy".to_string()
            }
            .is_retryable()
        );
        assert!(
            FetchError::Status {
                code: 503,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            !FetchError::Status {
                code: 404,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(!FetchError::Decode("eof".to_string()).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = FetchError::Status {
            code: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "http 502: bad gateway");
        assert_eq!(
            FetchError::Status {
                code: 500,
                body: String::new()
            }
            .to_string(),
            "http 500"
        );
    }

    #[test]
    fn test_url_joining() {
        let fetcher = HttpFetcher::new("https://api.example.com/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            fetcher.url("/diamonds"),
            "https://api.example.com/v1/diamonds"
        );
        assert_eq!(fetcher.url("watches"), "https://api.example.com/v1/watches");
    }

    #[test]
    fn test_method_serde() {
        let method: Method = serde_json::from_str("\"post\"").unwrap();
        assert_eq!(method, Method::Post);
        assert_eq!(Method::default().to_string(), "GET");
    }
}
