use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CACHE_CONTROL,
};
use axum::http::{HeaderName, HeaderValue, Response};
use axum::routing::get;
use axum::Router;
use hyper::StatusCode;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::ApiConfig;
use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};
use crate::http::routes::json_response;

pub const GAMES_PATH: &str = "/api/games";
pub const LEGACY_PATH: &str = "/api/psplus";

pub const X_PARTIAL_DATA: HeaderName = HeaderName::from_static("x-partial-data");
pub const X_PARTIAL_FAILURES: HeaderName = HeaderName::from_static("x-partial-failures");

/// Catalogue routes. Every response, errors included, carries the CORS and
/// edge caching headers.
pub fn routes(config: &ApiConfig) -> Router<Arc<Global>> {
    let cache_control = HeaderValue::try_from(config.cache_control()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid cache-control value, using default");
        HeaderValue::from_static("public, s-maxage=21600, stale-while-revalidate=86400")
    });

    Router::new()
        .route(GAMES_PATH, get(get_games).options(preflight))
        .route(LEGACY_PATH, get(get_games).options(preflight))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("GET,OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                ))
                .layer(SetResponseHeaderLayer::overriding(CACHE_CONTROL, cache_control)),
        )
}

/// GET /api/games
///
/// Returns the merged catalogue sorted by name. When some upstream lists
/// failed the response is still 200, flagged through the partial-data headers.
#[tracing::instrument(skip(global))]
async fn get_games(State(global): State<Arc<Global>>) -> Result<Response<Body>, ApiError> {
    let cached = global.catalogue.get().await.map_err(|e| {
        ApiError::internal_server_error(ApiErrorCode::AGGREGATION_FAILED, e.to_string())
    })?;

    let mut resp = json_response(cached.body.clone());

    if cached.is_partial() {
        let headers = resp.headers_mut();
        headers.insert(X_PARTIAL_DATA, HeaderValue::from_static("true"));
        headers.insert(X_PARTIAL_FAILURES, HeaderValue::from(cached.failed_count));
    }

    Ok(resp)
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
