//! Table API client error types.

use std::sync::Arc;

use kudos_core::{Error, FetchStage};

/// Errors from the table API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TablesError {
    /// No bearer token configured.
    #[error("missing API key: FILLOUT_TESTIMONIALS_API_KEY not set")]
    MissingApiKey,

    /// Request parameters rejected before sending.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Non-2xx response; the body is kept verbatim for passthrough.
    #[error("HTTP error: {status}")]
    Status { status: u16, body: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TablesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { TablesError::Timeout } else { TablesError::Network(Arc::new(err)) }
    }
}

impl TablesError {
    /// Attach the fetch stage and lift into the service error taxonomy.
    ///
    /// Upstream statuses pass through; everything else is an internal failure.
    pub fn at(self, stage: FetchStage) -> Error {
        match self {
            TablesError::Status { status, body } => Error::Upstream { stage, status, body },
            TablesError::MissingApiKey => Error::Config(TablesError::MissingApiKey.to_string()),
            other => Error::HttpError(format!("{stage}: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TablesError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = TablesError::Status { status: 404, body: "nope".into() };
        assert_eq!(err.to_string(), "HTTP error: 404");
    }

    #[test]
    fn test_status_becomes_upstream() {
        let err = TablesError::Status { status: 403, body: "forbidden".into() }.at(FetchStage::Collections);
        assert!(matches!(
            err,
            Error::Upstream { stage: FetchStage::Collections, status: 403, ref body } if body == "forbidden"
        ));
    }

    #[test]
    fn test_timeout_becomes_http_error() {
        let err = TablesError::Timeout.at(FetchStage::Testimonials);
        assert!(matches!(err, Error::HttpError(msg) if msg.starts_with("testimonials")));
    }
}
