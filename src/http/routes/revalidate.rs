use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};

use crate::catalogue::CACHE_TAG;
use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};

pub fn routes() -> Router<Arc<Global>> {
    Router::new().route("/api/revalidate", post(revalidate))
}

#[derive(Debug, serde::Deserialize)]
struct RevalidateQuery {
    tag: Option<String>,
}

#[derive(serde::Serialize)]
struct RevalidateResponse {
    revalidated: bool,
    tag: String,
}

/// POST /api/revalidate?tag=psplus
///
/// Drops the cached catalogue so the next read goes upstream again.
#[tracing::instrument(skip(global, headers))]
async fn revalidate(
    State(global): State<Arc<Global>>,
    headers: HeaderMap,
    Query(query): Query<RevalidateQuery>,
) -> Result<Json<RevalidateResponse>, ApiError> {
    let expected = global.config.api.revalidate_token.as_deref();
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if expected.is_none() || presented != expected {
        return Err(ApiError::unauthorized(
            ApiErrorCode::UNAUTHORIZED,
            "invalid revalidation token",
        ));
    }

    let tag = query.tag.unwrap_or_else(|| CACHE_TAG.to_string());

    if !global.catalogue.invalidate_tag(&tag).await {
        return Err(ApiError::bad_request(ApiErrorCode::UNKNOWN_TAG, "unknown tag"));
    }

    Ok(Json(RevalidateResponse {
        revalidated: true,
        tag,
    }))
}
