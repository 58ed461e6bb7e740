//! HTTP mapping of service errors.
//!
//! | error                | status          | body                                  |
//! |----------------------|-----------------|---------------------------------------|
//! | configuration        | 500             | `{error, details}`                    |
//! | collection not found | 404             | `{error, availableCollections}`       |
//! | upstream failure     | upstream status | `{error, details: <upstream body>}`   |
//! | anything else        | 500             | `{error, message}`                    |

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kudos_core::{Error, FetchStage};
use serde_json::{Value, json};

/// Shared caching policy of the testimonials endpoint.
pub const CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";

/// A service error on its way out as an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::CollectionNotFound { .. } => StatusCode::NOT_FOUND,
            Error::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Error::HttpError(_) | Error::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> Value {
        match &self.0 {
            Error::Config(msg) => json!({ "error": "Missing required environment variables", "details": msg }),
            Error::CollectionNotFound { target, available } => json!({
                "error": format!("{target} collection not found"),
                "availableCollections": available,
            }),
            Error::Upstream { stage, body, .. } => json!({ "error": stage.summary(), "details": body }),
            Error::HttpError(msg) | Error::Cache(msg) => json!({ "error": "Internal server error", "message": msg }),
        }
    }

    /// Configuration, collection lookup and not-found failures are not marked cacheable.
    fn cacheable(&self) -> bool {
        match &self.0 {
            Error::Upstream { stage, .. } => *stage != FetchStage::Collections,
            Error::HttpError(_) | Error::Cache(_) => true,
            Error::Config(_) | Error::CollectionNotFound { .. } => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), Json(self.body())).into_response();
        if self.cacheable() {
            response
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_500_without_cache_header() {
        let err = ApiError::from(Error::Config("FILLOUT_TESTIMONIALS_API_KEY".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body()["error"], "Missing required environment variables");

        let response = err.into_response();
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[test]
    fn test_not_found_lists_collections() {
        let err = ApiError::from(Error::CollectionNotFound {
            target: "DNC Reviews".into(),
            available: vec!["Partner Reviews".into()],
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body()["error"], "DNC Reviews collection not found");
        assert_eq!(err.body()["availableCollections"], json!(["Partner Reviews"]));
    }

    #[test]
    fn test_upstream_status_passes_through() {
        let err = ApiError::from(Error::Upstream {
            stage: FetchStage::Testimonials,
            status: 429,
            body: "slow down".into(),
        });
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.body(), json!({"error": "Failed to fetch testimonials", "details": "slow down"}));

        let response = err.into_response();
        assert_eq!(response.headers()[header::CACHE_CONTROL], CACHE_CONTROL);
    }

    #[test]
    fn test_collections_stage_failure_is_not_cacheable() {
        let err = ApiError::from(Error::Upstream {
            stage: FetchStage::Collections,
            status: 401,
            body: "bad token".into(),
        });
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.body()["error"], "Failed to fetch collections");

        let response = err.into_response();
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[test]
    fn test_non_error_upstream_status_becomes_bad_gateway() {
        let err = ApiError::from(Error::Upstream { stage: FetchStage::Collections, status: 302, body: String::new() });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(Error::Upstream { stage: FetchStage::Collections, status: 1000, body: String::new() });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_error_carries_message() {
        let err = ApiError::from(Error::HttpError("testimonials: request timeout".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body()["error"], "Internal server error");
        assert_eq!(err.body()["message"], "testimonials: request timeout");
    }
}
