//! HTTP gateway: the webhook endpoint the notification provider posts to.
//!
//! | Route | |
//! |---|---|
//! | `POST /`, `POST /sns` | envelope body, answered with the pipeline outcome |
//! | `GET /health` | liveness |

use crate::domain::config::BridgeConfig;
use crate::domain::error::BridgeError;
use crate::ports::inbound::EnvelopeProcessingApi;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header::USER_AGENT, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Span};
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    pipeline: Arc<dyn EnvelopeProcessingApi>,
    distinguish_rejections: bool,
}

/// Build the HTTP router.
pub fn build_router(pipeline: Arc<dyn EnvelopeProcessingApi>, config: &BridgeConfig) -> Router {
    let state = AppState {
        pipeline,
        distinguish_rejections: config.response.distinguish_rejections,
    };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(RequestBodyLimitLayer::new(config.http.body_limit));

    Router::new()
        .route("/", post(handle_envelope))
        .route("/sns", post(handle_envelope))
        .route("/health", get(health_check))
        .layer(middleware)
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(
    pipeline: Arc<dyn EnvelopeProcessingApi>,
    config: &BridgeConfig,
) -> Result<(), BridgeError> {
    let router = build_router(pipeline, config);
    let listener = tokio::net::TcpListener::bind(config.http.listen)
        .await
        .map_err(|e| BridgeError::Config(format!("cannot bind {}: {e}", config.http.listen)))?;

    info!(addr = %config.http.listen, "SNS bridge listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received shutdown signal");
    })
    .await
    .map_err(|e| BridgeError::Config(format!("server error: {e}")))
}

/// One span per request with the caller's address and user agent.
fn request_span(request: &Request<Body>) -> Span {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    info_span!(
        "sns_request",
        request_id = %Uuid::new_v4(),
        http.method = %request.method(),
        http.target = %request.uri().path(),
        remote_addr = %remote_addr,
        user_agent = %user_agent,
    )
}

/// Handle one webhook delivery
async fn handle_envelope(State(state): State<AppState>, body: String) -> Response {
    match state.pipeline.process(&body).await {
        Ok(outcome) => {
            let status = if outcome.is_rejected() && state.distinguish_rejections {
                StatusCode::FORBIDDEN
            } else {
                StatusCode::OK
            };
            (status, Json(outcome)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "sns-bridge",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
