//! HTTP transport for EDGAR requests.
//!
//! ### Fair access
//! - Every request carries the configured `User-Agent` (application + contact
//!   address); EDGAR rejects anonymous clients.
//! - Requests made through one transport are spaced by a minimum interval,
//!   shared by every caller holding that transport.
//!
//! ### Failure mapping
//! - Network errors, timeouts and non-2xx statuses all become
//!   `Error::Retrieval` carrying the requested URL. Nothing is retried.

pub mod pacer;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

use bytes::Bytes;
use reqwest::{Client, header};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

pub use pacer::RequestPacer;

use mcp_edgar_core::{AppConfig, Error};

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string, must identify the application and a contact address.
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Minimum spacing between requests (default: 200ms)
    pub request_interval: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "mcp-edgar/0.1 (contact@example.com)".to_string(),
            timeout: Duration::from_millis(20_000),
            request_interval: Duration::from_millis(200),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            request_interval: config.request_interval(),
            ..Default::default()
        }
    }
}

/// Response from a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL requested
    pub url: Url,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Something that can GET a URL.
///
/// The pipeline only ever talks to EDGAR through this trait, so callers decide
/// which client (and which pacing) it uses.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`, failing with `Error::Retrieval` on anything but a 2xx response.
    async fn get(&self, url: &Url) -> Result<FetchResponse, Error>;
}

/// reqwest-backed transport with request pacing.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    config: FetchConfig,
    pacer: Arc<RequestPacer>,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        if config.user_agent.trim().is_empty() {
            return Err(Error::InvalidInput("user agent cannot be empty".into()));
        }

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::InvalidInput(format!("failed to build HTTP client: {e}")))?;

        let pacer = Arc::new(RequestPacer::new(config.request_interval));

        Ok(Self { http, config, pacer })
    }

    /// Build the GET request for `url` with the mandatory identifying headers.
    fn request(&self, url: &Url) -> reqwest::RequestBuilder {
        self.http
            .get(url.as_str())
            .header(header::USER_AGENT, &self.config.user_agent)
            .header(header::ACCEPT_ENCODING, "gzip, deflate")
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<FetchResponse, Error> {
        self.pacer.acquire().await;

        let start = Instant::now();
        tracing::debug!(url = %url, "GET");

        let response = self.request(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::retrieval(url, format!("request timed out: {e}"))
            } else {
                Error::retrieval(url, format!("network error: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::retrieval(url, format!("status {}", status.as_u16())));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::retrieval(url, format!("failed to read response: {e}")))?;

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} in {}ms ({} bytes)", url, fetch_ms, bytes.len());

        Ok(FetchResponse { url: url.clone(), content_type, bytes, fetch_ms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert!(config.user_agent.contains('@'));
        assert_eq!(config.timeout, Duration::from_millis(20_000));
        assert_eq!(config.request_interval, Duration::from_millis(200));
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig {
            user_agent: "filings-bot/2.0 (ops@example.org)".into(),
            timeout_ms: 5_000,
            request_interval_ms: 1_000,
            ..Default::default()
        };

        let config = FetchConfig::from(&app);
        assert_eq!(config.user_agent, "filings-bot/2.0 (ops@example.org)");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.request_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_transport_rejects_empty_user_agent() {
        let config = FetchConfig { user_agent: "  ".into(), ..Default::default() };
        assert!(matches!(HttpTransport::new(config), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_request_carries_user_agent() {
        let config = FetchConfig { user_agent: "filings-bot/2.0 (ops@example.org)".into(), ..Default::default() };
        let transport = HttpTransport::new(config).unwrap();
        let url = Url::parse("https://data.sec.gov/submissions/CIK0001018724.json").unwrap();

        let request = transport.request(&url).build().unwrap();
        assert_eq!(request.url(), &url);
        assert_eq!(
            request.headers().get(header::USER_AGENT).unwrap(),
            "filings-bot/2.0 (ops@example.org)"
        );
    }

    #[test]
    fn test_fetch_response_text() {
        let response = FetchResponse {
            url: Url::parse("https://example.com").unwrap(),
            content_type: Some("text/html".to_string()),
            bytes: Bytes::from_static(b"<html></html>"),
            fetch_ms: 10,
        };

        assert_eq!(response.text(), "<html></html>");
        assert_eq!(response.url.as_str(), "https://example.com/");
    }
}
