//! Service-level error taxonomy.
//!
//! Every layer boundary converts into [`DirectoryError`] and callers
//! pattern-match on the kind. The distinction that matters to clients:
//! `NotFound` means the record does not exist, `RateLimited` means try
//! again later, `Validation` means the input was bad, and everything
//! else is an internal fault.

use thiserror::Error;

use crate::cache::CacheError;
use crate::client::ClientError;
use crate::model::ValidationError;

/// Errors surfaced by [`DirectoryService`](crate::service::DirectoryService).
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The requested employee does not exist upstream.
    #[error("employee with id {id} not found")]
    NotFound {
        /// The identifier that could not be resolved.
        id: String,
    },

    /// The upstream exhausted its retry budget without producing data.
    #[error("upstream rate limited; retry later")]
    RateLimited,

    /// Create input rejected before any I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An operation was asked for something the data cannot provide,
    /// e.g. the highest salary of an empty collection.
    #[error("{0}")]
    Invariant(String),

    /// The cache store failed an operation.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Any other upstream transport or protocol fault.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl DirectoryError {
    /// Translates a client error at the engine boundary.
    ///
    /// `NotFound` needs the id the caller asked for, which the client
    /// layer does not carry, so the conversion is explicit rather than
    /// a blanket `From`.
    pub fn from_client(err: ClientError, id: Option<&str>) -> Self {
        match err {
            ClientError::NotFound => Self::NotFound {
                id: id.unwrap_or("<unknown>").to_string(),
            },
            ClientError::RateLimited => Self::RateLimited,
            ClientError::Upstream(msg) => Self::Upstream(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_id() {
        let err = DirectoryError::from_client(ClientError::NotFound, Some("e-7"));
        assert!(matches!(err, DirectoryError::NotFound { ref id } if id == "e-7"));
        assert!(err.to_string().contains("e-7"));
    }

    #[test]
    fn test_rate_limited_maps_through() {
        let err = DirectoryError::from_client(ClientError::RateLimited, None);
        assert!(matches!(err, DirectoryError::RateLimited));
    }

    #[test]
    fn test_validation_error_converts() {
        let input = crate::model::CreateEmployeeInput {
            name: String::new(),
            salary: 100,
            age: 30,
            title: "x".to_string(),
        };
        let err: DirectoryError = input.validate().unwrap_err().into();
        assert!(matches!(err, DirectoryError::Validation(_)));
    }
}
