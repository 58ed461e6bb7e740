//! HTTP routes.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use kudos_core::Testimonial;
use serde::Serialize;

use crate::error::{ApiError, CACHE_CONTROL};
use crate::middleware::log_responses;
use crate::state::AppState;

const X_CACHE: &str = "x-cache";
const X_DATA_HASH: &str = "x-data-hash";

#[derive(Debug, Serialize)]
pub struct TestimonialsBody {
    pub testimonials: Vec<Testimonial>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/testimonials", get(get_testimonials))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
}

async fn healthz() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn get_testimonials(State(state): State<AppState>) -> Result<Response, ApiError> {
    let loaded = state
        .testimonials()?
        .load()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "error fetching testimonials"))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    if let Some(outcome) = &loaded.cache {
        headers.insert(X_CACHE, HeaderValue::from_static(outcome.status.as_str()));
        if let Ok(hash) = HeaderValue::from_str(&outcome.hash) {
            headers.insert(X_DATA_HASH, hash);
        }
    }

    Ok((headers, Json(TestimonialsBody { testimonials: loaded.testimonials })).into_response())
}
