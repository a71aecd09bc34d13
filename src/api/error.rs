use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::ai::AiError;
use crate::forecast::ForecastError;
use crate::sim::SimError;

use super::types::ErrorResponse;

/// Message shown to clients whenever the AI path fails.
pub const UNAVAILABLE_MESSAGE: &str =
    "Prediction unavailable: failed to get a valid response from the AI model. Please try again.";

/// Errors returned from handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body or its values are invalid.
    #[error("{0}")]
    BadRequest(String),
    /// The AI collaborator is missing or failed; the cause is logged only.
    #[error("prediction unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match &self {
            ApiError::BadRequest(msg) => {
                tracing::debug!(error = %self, "client error");
                msg.clone()
            }
            ApiError::Unavailable(_) => {
                tracing::warn!(error = %self, "AI request failed");
                UNAVAILABLE_MESSAGE.to_string()
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<SimError> for ApiError {
    fn from(e: SimError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<ForecastError> for ApiError {
    fn from(e: ForecastError) -> Self {
        ApiError::BadRequest(format!("invalid forecast: {e}"))
    }
}

impl From<AiError> for ApiError {
    fn from(e: AiError) -> Self {
        ApiError::Unavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unavailable("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn ai_errors_become_unavailable() {
        let err = ApiError::from(AiError::EmptyResponse);
        assert!(matches!(err, ApiError::Unavailable(_)));
    }

    #[test]
    fn sim_errors_become_bad_request() {
        let err = ApiError::from(SimError::UnknownVariant("lstm".into()));
        assert_eq!(err.to_string(), "unknown model variant \"lstm\" (expected physics, ml or deep)");
    }
}
