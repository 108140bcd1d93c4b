use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use axum::extract::Request;
use axum::response::Response;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::global::Global;

pub mod error;
pub mod routes;


pub fn app(global: Arc<Global>) -> Router {
    Router::new()
        .merge(routes::routes(&global))
        .with_state(global)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(request_span)
                        .on_request(())
                        .on_response(record_response)
                        .on_failure(()),
                ),
        )
}

fn request_span(req: &Request) -> Span {
    tracing::info_span!(
        "catalogue_request",
        method = %req.method(),
        path = req.uri().path(),
        status = tracing::field::Empty,
        partial_failures = tracing::field::Empty,
    )
}

/// Records the outcome on the request span. Partial catalogues and server
/// errors are raised above info so they stand out in the default filter.
fn record_response(res: &Response, latency: Duration, span: &Span) {
    let status = res.status().as_u16();
    span.record("status", status);

    let partial_failures = res
        .headers()
        .get(routes::games::X_PARTIAL_FAILURES)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());

    if let Some(failures) = partial_failures {
        span.record("partial_failures", failures);
    }

    match (res.status().is_server_error(), partial_failures) {
        (true, _) => tracing::warn!(status, ?latency, "catalogue request failed"),
        (false, Some(failures)) => {
            tracing::warn!(status, failures, ?latency, "served partial catalogue")
        }
        (false, None) => tracing::info!(status, ?latency, "served"),
    }
}

#[tracing::instrument]
async fn not_found() -> error::ApiError {
    error::ApiError::not_found(error::ApiErrorCode::ROUTE_NOT_FOUND, "route not found")
}

#[tracing::instrument(name = "HTTP", skip_all)]
pub async fn run(global: Arc<Global>) -> anyhow::Result<()> {
    let bind = global.config.api.bind;

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .context("failed to bind HTTP server")?;

    tracing::info!(%bind, "http server listening");

    axum::serve(
        listener,
        app(global).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("http server error")?;

    Ok(())
}
