//! Client for the remote employee-directory API.
//!
//! Every operation decodes the upstream's [`ApiEnvelope`] and applies
//! the retry policy to the two "no data" conditions: an HTTP 429, and
//! a successful envelope that simply carries no payload. The upstream
//! does not distinguish silent throttling from an empty response, and
//! neither does this client - exhausting the attempt budget in either
//! state raises [`ClientError::RateLimited`]. Any other fault is not
//! retried and propagates immediately.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::client::http::{HttpClient, HttpError};
use crate::client::retry::RetryPolicy;
use crate::model::{ApiEnvelope, CreateEmployeeInput, DeleteEmployeeInput, Employee};
use crate::telemetry::DirectoryMetrics;

/// Failures the directory client surfaces to the consistency engine.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The retry budget was exhausted without the upstream producing a
    /// payload (throttled, or persistently empty - indistinguishable).
    #[error("upstream produced no data within the retry budget")]
    RateLimited,

    /// The upstream reported the resource does not exist.
    #[error("upstream resource not found")]
    NotFound,

    /// Any other transport or protocol fault.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

/// What a single attempt produced, before retry accounting.
enum Attempt<T> {
    /// A usable payload.
    Data(T),
    /// No payload - either a 429 or an empty envelope. Retryable.
    NoData,
}

/// Client for the upstream directory API.
///
/// Cheap to clone; the transport is shared.
#[derive(Clone)]
pub struct DirectoryClient {
    http: Arc<dyn HttpClient>,
    retry: RetryPolicy,
    metrics: Arc<DirectoryMetrics>,
}

impl DirectoryClient {
    /// Creates a client over the given transport with the given retry
    /// policy.
    pub fn new(
        http: Arc<dyn HttpClient>,
        retry: RetryPolicy,
        metrics: Arc<DirectoryMetrics>,
    ) -> Self {
        Self {
            http,
            retry,
            metrics,
        }
    }

    /// Fetches the complete employee collection.
    pub async fn fetch_all(&self) -> Result<Vec<Employee>, ClientError> {
        self.call_with_retry("GET", "", || self.http.get("")).await
    }

    /// Fetches a single employee by id.
    ///
    /// A 404 maps to [`ClientError::NotFound`] without retrying.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Employee, ClientError> {
        let path = format!("/{}", id);
        self.call_with_retry("GET", &path, || self.http.get(&path))
            .await
    }

    /// Creates an employee upstream and returns the created record.
    pub async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee, ClientError> {
        let body = serde_json::to_vec(input)
            .map_err(|e| ClientError::Upstream(format!("failed to encode create input: {}", e)))?;
        self.call_with_retry("POST", "", || self.http.post("", body.clone()))
            .await
    }

    /// Deletes an employee by name, the addressing scheme the upstream
    /// delete endpoint requires. Returns the upstream acknowledgement.
    pub async fn delete_by_name(&self, name: &str) -> Result<bool, ClientError> {
        let input = DeleteEmployeeInput {
            name: name.to_string(),
        };
        let body = serde_json::to_vec(&input)
            .map_err(|e| ClientError::Upstream(format!("failed to encode delete input: {}", e)))?;
        self.call_with_retry("DELETE", "", || self.http.delete("", body.clone()))
            .await
    }

    /// Issues a call under the retry policy.
    ///
    /// The closure is re-invoked for each attempt. "No data" (429 or an
    /// empty envelope) consumes an attempt; any other error short
    /// circuits the loop.
    async fn call_with_retry<'a, T, F>(
        &self,
        verb: &str,
        path: &str,
        mut call: F,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: FnMut() -> crate::cache::BoxFuture<'a, Result<Vec<u8>, HttpError>>,
    {
        let mut attempt = 1u32;
        loop {
            self.metrics.upstream_call();
            match Self::decode_attempt(call().await)? {
                Attempt::Data(value) => {
                    debug!(verb, path, attempt, "upstream call succeeded");
                    return Ok(value);
                }
                Attempt::NoData => match self.retry.delay_for_attempt(attempt) {
                    Some(delay) => {
                        warn!(
                            verb,
                            path,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "no data from upstream; backing off"
                        );
                        self.metrics.upstream_retry();
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        warn!(verb, path, attempt, "retry budget exhausted without data");
                        return Err(ClientError::RateLimited);
                    }
                },
            }
        }
    }

    /// Classifies one transport outcome.
    fn decode_attempt<T>(outcome: Result<Vec<u8>, HttpError>) -> Result<Attempt<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        match outcome {
            Ok(body) => {
                let envelope: ApiEnvelope<T> = serde_json::from_slice(&body).map_err(|e| {
                    ClientError::Upstream(format!("failed to decode upstream envelope: {}", e))
                })?;
                match envelope.into_data() {
                    Some(data) => Ok(Attempt::Data(data)),
                    // An empty envelope is the upstream's throttling
                    // signal; indistinguishable from "no such data".
                    None => Ok(Attempt::NoData),
                }
            }
            Err(HttpError::RateLimited) => Ok(Attempt::NoData),
            Err(HttpError::NotFound) => Err(ClientError::NotFound),
            Err(HttpError::Status(code)) => {
                Err(ClientError::Upstream(format!("unexpected HTTP {}", code)))
            }
            Err(HttpError::Transport(msg)) => Err(ClientError::Upstream(msg)),
        }
    }
}
