//! Scrape cycle errors.

use nsxt_client::ApiError;
use thiserror::Error;

use crate::certificate::CertificateDecodeError;

/// Result type alias using [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Any error that aborts a scrape cycle.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The manager could not be queried.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A single-result endpoint returned nothing.
    #[error("No {kind} found for {id}")]
    NotFound { kind: &'static str, id: String },

    /// A single-result endpoint returned several results.
    #[error("Too many {kind} results for {id}: {count}")]
    TooManyResults {
        kind: &'static str,
        id: String,
        count: usize,
    },

    /// A status record has no matching statistics record.
    #[error("Unable to find {kind} {key} for load balancer {lb}")]
    Unresolved {
        kind: &'static str,
        key: String,
        lb: String,
    },

    /// A status record lacks the field it is joined on.
    #[error("{kind} without identifying key on load balancer {lb}")]
    MissingKey { kind: &'static str, lb: String },

    #[error(transparent)]
    Certificate(#[from] CertificateDecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ScrapeError::Unresolved {
            kind: "pool member statistics",
            key: "10.0.0.1:80".to_string(),
            lb: "lb1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to find pool member statistics 10.0.0.1:80 for load balancer lb1"
        );

        let err = ScrapeError::TooManyResults {
            kind: "load balancer status",
            id: "lb1".to_string(),
            count: 2,
        };
        assert_eq!(err.to_string(), "Too many load balancer status results for lb1: 2");
    }
}
