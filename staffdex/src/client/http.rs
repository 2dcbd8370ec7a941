//! HTTP transport abstraction for testability.
//!
//! [`HttpClient`] lets the directory client be exercised against a
//! scripted mock; [`ReqwestClient`] is the real implementation.

use thiserror::Error;

use crate::cache::BoxFuture;

/// Transport-level outcomes the directory client dispatches on.
#[derive(Clone, Debug, Error)]
pub enum HttpError {
    /// HTTP 429 - the upstream is throttling. Treated as "no data" and
    /// retried.
    #[error("upstream rate limited (429)")]
    RateLimited,

    /// HTTP 404 - the resource does not exist. Never retried.
    #[error("resource not found (404)")]
    NotFound,

    /// Any other non-success status. Never retried.
    #[error("HTTP {0}")]
    Status(u16),

    /// Connection, TLS, or timeout failure before a status arrived.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Trait for HTTP operations against the upstream directory.
///
/// Paths are relative to a base URL owned by the implementation.
/// Request and response bodies are raw bytes; envelope decoding is the
/// caller's concern.
pub trait HttpClient: Send + Sync {
    /// Performs a GET request, returning the response body.
    fn get(&self, path: &str) -> BoxFuture<'_, Result<Vec<u8>, HttpError>>;

    /// Performs a POST request with a JSON body.
    fn post(&self, path: &str, body: Vec<u8>) -> BoxFuture<'_, Result<Vec<u8>, HttpError>>;

    /// Performs a DELETE request with a JSON body.
    ///
    /// The upstream's delete endpoint takes a body naming the employee,
    /// which is unusual but part of its contract.
    fn delete(&self, path: &str, body: Vec<u8>) -> BoxFuture<'_, Result<Vec<u8>, HttpError>>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestClient {
    /// Creates a client with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, HttpError> {
        Self::with_timeout(base_url, std::time::Duration::from_secs(30))
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, HttpError> {
        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Transport(format!("request failed: {}", e)))?;

        let status = response.status();
        match status.as_u16() {
            429 => return Err(HttpError::RateLimited),
            404 => return Err(HttpError::NotFound),
            code if !status.is_success() => return Err(HttpError::Status(code)),
            _ => {}
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Transport(format!("failed to read response: {}", e)))
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, path: &str) -> BoxFuture<'_, Result<Vec<u8>, HttpError>> {
        let url = self.url(path);
        Box::pin(async move { self.dispatch(self.client.get(url)).await })
    }

    fn post(&self, path: &str, body: Vec<u8>) -> BoxFuture<'_, Result<Vec<u8>, HttpError>> {
        let url = self.url(path);
        Box::pin(async move {
            let request = self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
            self.dispatch(request).await
        })
    }

    fn delete(&self, path: &str, body: Vec<u8>) -> BoxFuture<'_, Result<Vec<u8>, HttpError>> {
        let url = self.url(path);
        Box::pin(async move {
            let request = self
                .client
                .delete(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
            self.dispatch(request).await
        })
    }
}
