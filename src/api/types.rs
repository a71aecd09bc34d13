//! API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::ai::ChatMessage;
use crate::sim::types::{ForecastPoint, ModelVariant, PanelConfig};

use super::error::ApiError;

/// Message returned for any malformed prediction request.
pub const INVALID_PANEL_MESSAGE: &str = "Invalid panel configuration provided.";

const DEFAULT_CAPACITY_KW: f64 = 5.0;
const DEFAULT_TILT_DEG: f64 = 20.0;
const DEFAULT_AZIMUTH_DEG: f64 = 180.0;

/// Body of `POST /api/predict`, shaped like the browser form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    /// Latitude in degrees (required).
    pub latitude: Option<f64>,
    /// Longitude in degrees (required).
    pub longitude: Option<f64>,
    /// Capacity in kWp.
    pub capacity: Option<f64>,
    /// Tilt in degrees.
    pub tilt: Option<f64>,
    /// Azimuth in degrees.
    pub azimuth: Option<f64>,
    /// Local model variant; absent means "ask the AI model if available".
    pub model: Option<String>,
    /// Seed for reproducible local simulation.
    pub seed: Option<u64>,
}

impl PredictRequest {
    /// Builds a panel config, returning whether a model was named explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] if latitude or longitude is missing
    /// or the model name is unknown.
    pub fn to_panel(&self) -> Result<(PanelConfig, bool), ApiError> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(ApiError::BadRequest(INVALID_PANEL_MESSAGE.to_string()));
        };
        let model = match self.model.as_deref() {
            Some(name) => name.parse::<ModelVariant>()?,
            None => ModelVariant::Physics,
        };
        let panel = PanelConfig {
            latitude,
            longitude,
            capacity_kw: self.capacity.unwrap_or(DEFAULT_CAPACITY_KW),
            tilt_deg: self.tilt.unwrap_or(DEFAULT_TILT_DEG),
            azimuth_deg: self.azimuth.unwrap_or(DEFAULT_AZIMUTH_DEG),
            model,
        };
        Ok((panel, self.model.is_some()))
    }
}

/// Body of `POST /api/insight`.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightRequest {
    /// Hourly series to analyze.
    pub forecast: Vec<ForecastPoint>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Hourly series the conversation is about.
    pub forecast: Vec<ForecastPoint>,
    /// Panel that produced the forecast, if known.
    #[serde(default)]
    pub panel: Option<PanelConfig>,
    /// Earlier turns, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    /// The new question.
    pub message: String,
}

/// Reply to `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant answer.
    pub reply: String,
}

/// Reply to `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Whether the AI client is configured.
    pub ai_enabled: bool,
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_longitude_is_bad_request() {
        let req = PredictRequest {
            latitude: Some(40.0),
            ..PredictRequest::default()
        };
        assert!(matches!(req.to_panel(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let req = PredictRequest {
            latitude: Some(40.0),
            longitude: Some(-74.0),
            ..PredictRequest::default()
        };
        let (panel, explicit) = req.to_panel().expect("coordinates present");
        assert!(!explicit);
        assert_eq!(panel.capacity_kw, 5.0);
        assert_eq!(panel.tilt_deg, 20.0);
        assert_eq!(panel.azimuth_deg, 180.0);
        assert_eq!(panel.model, ModelVariant::Physics);
    }

    #[test]
    fn form_model_label_is_accepted() {
        let req: PredictRequest = serde_json::from_str(
            r#"{"latitude":1.0,"longitude":2.0,"capacity":3.0,"tilt":10,"azimuth":90,
                "model":"Deep Learning Model"}"#,
        )
        .expect("valid body");
        let (panel, explicit) = req.to_panel().expect("valid panel");
        assert!(explicit);
        assert_eq!(panel.model, ModelVariant::DeepLearning);
        assert_eq!(panel.azimuth_deg, 90.0);
    }
}
