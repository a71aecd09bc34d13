//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{debug, info};

use super::AppState;
use super::error::ApiError;
use super::types::{
    ChatRequest, ChatResponse, HealthResponse, INVALID_PANEL_MESSAGE, InsightRequest,
    PredictRequest,
};
use crate::ai::AiInsight;
use crate::forecast::normalize;
use crate::sim::types::Forecast;

/// Produces a 24-hour forecast for the submitted panel.
///
/// `POST /api/predict` → 200 + `[{hour, power_kw}, ...]`
///
/// With a `model` the local simulator runs; without one the AI client is
/// used when configured, otherwise the physics variant.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Forecast>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        debug!(error = %e, "rejected prediction body");
        ApiError::BadRequest(INVALID_PANEL_MESSAGE.to_string())
    })?;
    let (panel, explicit_model) = req.to_panel()?;
    panel.validate()?;

    if let (false, Some(ai)) = (explicit_model, state.ai.as_ref()) {
        info!(latitude = panel.latitude, longitude = panel.longitude, "AI prediction");
        let forecast = ai.predict(&panel).await?;
        return Ok(Json(forecast));
    }

    let forecast = match req.seed.or(state.seed) {
        Some(seed) => state.simulator.simulate_seeded(&panel, seed)?,
        None => state.simulator.simulate_unseeded(&panel)?,
    };
    info!(model = %panel.model, "local prediction");
    Ok(Json(forecast))
}

/// Asks the AI model for a narrative insight on a forecast.
///
/// `POST /api/insight` → 200 + `{title, explanation, suggestions}`
pub async fn insight(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InsightRequest>, JsonRejection>,
) -> Result<Json<AiInsight>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let forecast = normalize(req.forecast)?;
    let ai = state.ai()?;
    Ok(Json(ai.insight(&forecast).await?))
}

/// Answers a question about a forecast.
///
/// `POST /api/chat` → 200 + `{reply}`
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }
    let forecast = normalize(req.forecast)?;
    let ai = state.ai()?;
    let reply = ai
        .chat(&forecast, req.panel.as_ref(), &req.history, &req.message)
        .await?;
    Ok(Json(ChatResponse { reply }))
}

/// Liveness probe.
///
/// `GET /api/health` → 200 + `{status, ai_enabled}`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        ai_enabled: state.ai.is_some(),
    })
}
