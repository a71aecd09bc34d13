//! REST API in front of the curve simulator and the AI client.
//!
//! Endpoints:
//! - `POST /api/predict`: 24-hour forecast, local or AI-generated
//! - `POST /api/insight`: narrative analysis of a forecast
//! - `POST /api/chat`: question answering about a forecast
//! - `GET /api/health`: liveness and AI availability

mod error;
mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::ai::AiClient;
use crate::config::ServerConfig;
use crate::sim::CurveSimulator;

pub use error::{ApiError, UNAVAILABLE_MESSAGE};
pub use types::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, INVALID_PANEL_MESSAGE,
    InsightRequest, PredictRequest,
};

/// Application state shared across all request handlers.
///
/// Built once by the entry point and wrapped in `Arc`; nothing in it is
/// mutated after startup.
pub struct AppState {
    /// Local curve generator.
    pub simulator: CurveSimulator,
    /// Text-generation client, if configured.
    pub ai: Option<AiClient>,
    /// Default seed for local simulation; `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl AppState {
    fn ai(&self) -> Result<&AiClient, ApiError> {
        self.ai
            .as_ref()
            .ok_or_else(|| ApiError::Unavailable("AI client is not configured".to_string()))
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/predict", post(handlers::predict))
        .route("/api/insight", post(handlers::insight))
        .route("/api/chat", post(handlers::chat))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}

/// Router plus static files, CORS, and request tracing per `server`.
pub fn app(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let mut app = router(state);
    if let Some(dir) = &server.static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }
    if server.cors {
        app = app.layer(CorsLayer::permissive());
    }
    app.layer(TraceLayer::new_for_http())
}

/// Binds to `addr` and serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, server: &ServerConfig, addr: SocketAddr) -> io::Result<()> {
    let app = app(state, server);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! { _ = ctrl_c => {}, _ = terminate => {}, }
    info!("shutdown signal received");
}
