use axum::body::Body;
use axum::http::{header, HeaderValue, Method};
use axum::response::Response;
use axum::{http::StatusCode, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::error::{method_not_allowed, not_found};
use super::routes;
use crate::config::ServerSettings;
use crate::db::TriviaStore;

const ALLOW_HEADERS: &str = "Content-Type, Authorization, true";
const ALLOW_METHODS: &str = "GET, PUT, POST, DELETE, OPTIONS";

pub fn build_router<S: TriviaStore>(store: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::<S>::new()
        .route("/metrics", get(metrics))
        .merge(category_router::<S>())
        .merge(questions_router::<S>())
        .merge(quizzes_router::<S>())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(store)
        .layer(cors)
        // outside the cors layer so preflight answers get the fixed values too
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server<S: TriviaStore>(store: S, settings: &ServerSettings) -> anyhow::Result<()> {
    let addr = settings.address();
    let app = build_router(store);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn metrics() -> Result<Response, StatusCode> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).map_err(|e| {
        tracing::error!("Failed to encode metrics: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
