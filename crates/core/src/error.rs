//! Unified error types for kudos.
//!
//! Every failure is terminal for the request that hit it. The HTTP layer maps
//! each variant onto a status code and JSON body.

use std::fmt;

/// Upstream call a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// Collection lookup by name.
    Collections,
    /// Join records linking the collection to testimonials.
    CollectionTestimonials,
    /// Full testimonial records.
    Testimonials,
}

impl FetchStage {
    /// Human-readable summary used as the `error` field of upstream failures.
    pub fn summary(self) -> &'static str {
        match self {
            FetchStage::Collections => "Failed to fetch collections",
            FetchStage::CollectionTestimonials => "Failed to fetch collection testimonials",
            FetchStage::Testimonials => "Failed to fetch testimonials",
        }
    }
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchStage::Collections => "collections",
            FetchStage::CollectionTestimonials => "collection_testimonials",
            FetchStage::Testimonials => "testimonials",
        };
        f.write_str(name)
    }
}

/// Unified error types for the kudos service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required configuration is absent.
    #[error("CONFIG_MISSING: {0}")]
    Config(String),

    /// No collection matched the configured name.
    #[error("COLLECTION_NOT_FOUND: {target}")]
    CollectionNotFound { target: String, available: Vec<String> },

    /// The table API answered with a non-2xx status.
    #[error("UPSTREAM_ERROR: {stage} returned {status}")]
    Upstream { stage: FetchStage, status: u16, body: String },

    /// Transport, timeout or decoding failure talking to the table API.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Cache backend failure.
    #[error("CACHE_ERROR: {0}")]
    Cache(String),
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_error_display() {
        let err = Error::CollectionNotFound { target: "DNC Reviews".to_string(), available: vec![] };
        assert!(err.to_string().contains("COLLECTION_NOT_FOUND"));
        assert!(err.to_string().contains("DNC Reviews"));
    }

    #[test]
    fn test_upstream_display_names_stage() {
        let err = Error::Upstream { stage: FetchStage::CollectionTestimonials, status: 503, body: String::new() };
        assert_eq!(err.to_string(), "UPSTREAM_ERROR: collection_testimonials returned 503");
    }

    #[test]
    fn test_stage_summary() {
        assert_eq!(FetchStage::Collections.summary(), "Failed to fetch collections");
        assert_eq!(FetchStage::Testimonials.summary(), "Failed to fetch testimonials");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Error = ConfigError::Missing { field: "api_key".into(), hint: "set it".into() }.into();
        assert!(matches!(err, Error::Config(msg) if msg.contains("api_key")));
    }
}
