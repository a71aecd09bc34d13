//! HTTP client for the hosted text-generation model.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use super::prompts;
use super::types::{
    AiInsight, ChatMessage, Content, GenerateRequest, GenerateResponse, GenerationConfig, Sender,
};
use crate::config::AiConfig;
use crate::forecast::normalize;
use crate::sim::types::{Forecast, ForecastPoint, PanelConfig};

/// Failures talking to the text-generation service.
#[derive(Debug, Error)]
pub enum AiError {
    /// The API key environment variable is unset or empty.
    #[error("environment variable {0} is not set")]
    MissingKey(String),
    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },
    /// The service answered with no text.
    #[error("upstream returned an empty response")]
    EmptyResponse,
    /// The text did not match the requested shape.
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiError::Timeout
        } else {
            AiError::Request(e)
        }
    }
}

/// Longest upstream error body kept in [`AiError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Client for the `generateContent` endpoint.
///
/// Constructed once by the entry point and shared by reference; holds a
/// pooled `reqwest::Client` and never reads process state after creation.
#[derive(Debug, Clone)]
pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    insight_points: usize,
}

impl AiClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Request`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            insight_points: 20,
        })
    }

    /// Creates a client from config, with the key supplied by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Request`] if the HTTP client cannot be built.
    pub fn from_config(cfg: &AiConfig, api_key: impl Into<String>) -> Result<Self, AiError> {
        Ok(Self::new(
            &cfg.base_url,
            &cfg.model,
            api_key,
            Duration::from_secs(cfg.timeout_secs),
        )?
        .with_insight_points(cfg.insight_points))
    }

    /// Creates a client from config, reading the key from `cfg.api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::MissingKey`] if the variable is unset or empty.
    pub fn from_env(cfg: &AiConfig) -> Result<Self, AiError> {
        let key = std::env::var(&cfg.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AiError::MissingKey(cfg.api_key_env.clone()))?;
        Self::from_config(cfg, key)
    }

    /// Sets how many forecast points go into insight prompts.
    pub fn with_insight_points(mut self, n: usize) -> Self {
        self.insight_points = n.max(1);
        self
    }

    /// Model identifier in use.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks the model for a 24-hour forecast for `panel`.
    ///
    /// The returned series is sorted by hour and checked for completeness.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] on transport failure, non-success status,
    /// empty text, or a series that is not one point per hour.
    pub async fn predict(&self, panel: &PanelConfig) -> Result<Forecast, AiError> {
        let request = GenerateRequest {
            contents: vec![Content::user(prompts::prediction_prompt(panel))],
            system_instruction: None,
            generation_config: Some(GenerationConfig::json(prompts::prediction_schema())),
        };
        let text = self.generate(&request).await?;
        let points: Vec<ForecastPoint> = serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| AiError::Malformed(format!("prediction is not a point array: {e}")))?;
        normalize(points).map_err(|e| AiError::Malformed(e.to_string()))
    }

    /// Asks the model for a narrative insight about `forecast`.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] on transport failure, non-success status,
    /// empty text, or an insight missing a field.
    pub async fn insight(&self, forecast: &Forecast) -> Result<AiInsight, AiError> {
        let request = GenerateRequest {
            contents: vec![Content::user(prompts::insight_prompt(
                forecast,
                self.insight_points,
            ))],
            system_instruction: None,
            generation_config: Some(GenerationConfig::json(prompts::insight_schema())),
        };
        let text = self.generate(&request).await?;
        let insight: AiInsight = serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| AiError::Malformed(format!("insight has wrong shape: {e}")))?;
        if !insight.is_complete() {
            return Err(AiError::Malformed("insight has empty fields".to_string()));
        }
        Ok(insight)
    }

    /// Answers `message` about `forecast`, continuing `history`.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] on transport failure, non-success status, or
    /// empty text.
    pub async fn chat(
        &self,
        forecast: &Forecast,
        panel: Option<&PanelConfig>,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AiError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|m| {
                let role = match m.sender {
                    Sender::User => "user",
                    Sender::Ai => "model",
                };
                Content::with_role(role, m.text.clone())
            })
            .collect();
        contents.push(Content::user(message));

        let request = GenerateRequest {
            contents,
            system_instruction: Some(Content::system(prompts::chat_context(forecast, panel))),
            generation_config: None,
        };
        self.generate(&request).await
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!(model = %self.model, "calling text-generation service");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            warn!(status = status.as_u16(), "text-generation service rejected request");
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::Malformed(format!("unexpected response envelope: {e}")))?;
        let text = parsed.text().trim().to_string();
        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Strips a surrounding Markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
