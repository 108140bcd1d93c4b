use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::Response;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::global::Global;

pub mod games;
pub mod revalidate;

pub(super) fn json_response(bytes: Bytes) -> Response<Body> {
    ([(CONTENT_TYPE, "application/json")], bytes).into_response()
}

pub fn routes(global: &Arc<Global>) -> Router<Arc<Global>> {
    let mut router = Router::new()
        .route("/", get(root))
        .merge(games::routes(&global.config.api));

    if global.config.api.revalidate_token.is_some() {
        router = router.merge(revalidate::routes());
    }

    router
}

#[derive(serde::Serialize)]
struct RootResponse {
    message: &'static str,
    version: &'static str,
    uptime: u64,
    endpoints: Vec<&'static str>,
}

#[tracing::instrument(skip(global))]
async fn root(State(global): State<Arc<Global>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "PS Plus Catalogue API",
        version: env!("CARGO_PKG_VERSION"),
        uptime: global.started_at.elapsed().as_secs(),
        endpoints: vec![games::GAMES_PATH, games::LEGACY_PATH],
    })
}
