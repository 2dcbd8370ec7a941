//! The upstream response envelope.

use serde::{Deserialize, Serialize};

/// Wrapper the upstream puts around every response payload.
///
/// A missing `data` field is significant: the upstream signals silent
/// throttling by returning an envelope with no payload, so the client
/// layer treats "no data" and "rate limited" identically. That
/// conflation is part of the upstream contract and is deliberately not
/// disambiguated here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Consumes the envelope, yielding the payload if one is present.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
