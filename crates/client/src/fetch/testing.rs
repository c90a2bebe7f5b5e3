//! In-memory transport serving canned responses.

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;
use url::Url;

use super::{FetchResponse, Transport};
use mcp_edgar_core::Error;

#[derive(Debug, Clone)]
enum Route {
    Body(Bytes),
    Status(u16),
    NetworkError(String),
}

/// Transport answering from a fixed URL table and recording every request.
///
/// URLs without a route answer with status 404.
#[derive(Debug, Default)]
pub struct StaticTransport {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 for `url`.
    pub fn with_body(mut self, url: &str, body: impl Into<Bytes>) -> Self {
        self.routes.insert(url.to_string(), Route::Body(body.into()));
        self
    }

    /// Answer `url` with a bare status code.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Route::Status(status));
        self
    }

    /// Fail `url` as if the connection broke.
    pub fn with_network_error(mut self, url: &str, message: &str) -> Self {
        self.routes.insert(url.to_string(), Route::NetworkError(message.to_string()));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl Transport for StaticTransport {
    async fn get(&self, url: &Url) -> Result<FetchResponse, Error> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        match self.routes.get(url.as_str()) {
            Some(Route::Body(bytes)) => Ok(FetchResponse {
                url: url.clone(),
                content_type: None,
                bytes: bytes.clone(),
                fetch_ms: 0,
            }),
            Some(Route::Status(status)) if (200..300).contains(status) => Ok(FetchResponse {
                url: url.clone(),
                content_type: None,
                bytes: Bytes::new(),
                fetch_ms: 0,
            }),
            Some(Route::Status(status)) => Err(Error::retrieval(url, format!("status {status}"))),
            Some(Route::NetworkError(message)) => Err(Error::retrieval(url, format!("network error: {message}"))),
            None => Err(Error::retrieval(url, "status 404")),
        }
    }
}
