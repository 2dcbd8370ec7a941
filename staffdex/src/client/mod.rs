//! Upstream directory client.
//!
//! This module wraps the remote employee-directory API: a transport
//! abstraction ([`HttpClient`]) for testability, a bounded
//! [`RetryPolicy`], and the [`DirectoryClient`] that decodes response
//! envelopes and normalizes failures into [`ClientError`] kinds.

mod directory;
mod http;
mod retry;

pub use directory::{ClientError, DirectoryClient};
pub use http::{HttpClient, HttpError, ReqwestClient};
pub use retry::{
    RetryPolicy, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_DELAY_SECS,
};

#[cfg(test)]
pub use http::tests::MockHttpClient;
