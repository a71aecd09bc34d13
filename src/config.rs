//! TOML-based application configuration and preset panel definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::sim::types::{ModelVariant, PanelConfig};

/// Top-level configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`AppConfig::from_toml_file`] or use [`AppConfig::new_york`] for the
/// built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Text-generation service settings.
    #[serde(default)]
    pub ai: AiConfig,
    /// Default panel used by the CLI.
    #[serde(default)]
    pub panel: PanelSection,
    /// Simulation settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `"0.0.0.0:8080"`.
    pub bind: String,
    /// Directory holding a built single-page app, served for unmatched paths.
    pub static_dir: Option<PathBuf>,
    /// Allow cross-origin requests.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            static_dir: None,
            cors: true,
        }
    }
}

/// Text-generation service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    /// Whether the AI client is constructed at all.
    pub enabled: bool,
    /// Service root URL.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout in seconds (must be > 0).
    pub timeout_secs: u64,
    /// How many forecast points are summarized into insight prompts.
    pub insight_points: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_secs: 30,
            insight_points: 20,
        }
    }
}

/// Default panel parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelSection {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Nameplate capacity (kWp).
    pub capacity_kw: f64,
    /// Tilt from horizontal in degrees.
    pub tilt_deg: f64,
    /// Azimuth from north in degrees.
    pub azimuth_deg: f64,
    /// Model variant: `"physics"`, `"ml"` or `"deep"`.
    pub model: String,
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.006,
            capacity_kw: 5.0,
            tilt_deg: 20.0,
            azimuth_deg: 180.0,
            model: "physics".to_string(),
        }
    }
}

impl PanelSection {
    /// Converts to a [`PanelConfig`].
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the model name is unknown.
    pub fn to_panel(&self) -> Result<PanelConfig, ConfigError> {
        let model: ModelVariant = self.model.parse().map_err(|e| ConfigError {
            field: "panel.model".to_string(),
            message: format!("{e}"),
        })?;
        Ok(PanelConfig {
            latitude: self.latitude,
            longitude: self.longitude,
            capacity_kw: self.capacity_kw,
            tilt_deg: self.tilt_deg,
            azimuth_deg: self.azimuth_deg,
            model,
        })
    }
}

/// Simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Fixed seed; when unset every run draws fresh entropy.
    pub seed: Option<u64>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"panel.capacity_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl AppConfig {
    /// Residential 5 kWp array in New York City facing south.
    pub fn new_york() -> Self {
        Self::default()
    }

    /// Southern-hemisphere array in Sydney facing north.
    pub fn sydney() -> Self {
        Self {
            panel: PanelSection {
                latitude: -33.8688,
                longitude: 151.2093,
                capacity_kw: 6.6,
                tilt_deg: 30.0,
                azimuth_deg: 0.0,
                model: "ml".to_string(),
            },
            ..Self::default()
        }
    }

    /// Steep rooftop array in Berlin using the deep-learning curve.
    pub fn berlin_rooftop() -> Self {
        Self {
            panel: PanelSection {
                latitude: 52.52,
                longitude: 13.405,
                capacity_kw: 9.8,
                tilt_deg: 45.0,
                azimuth_deg: 200.0,
                model: "deep".to_string(),
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["new_york", "sydney", "berlin_rooftop"];

    /// Loads configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "new_york" => Ok(Self::new_york()),
            "sydney" => Ok(Self::sydney()),
            "berlin_rooftop" => Ok(Self::berlin_rooftop()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ConfigError {
                field: "server.bind".into(),
                message: format!("must be a socket address, got \"{}\"", self.server.bind),
            });
        }

        let ai = &self.ai;
        if ai.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "ai.timeout_secs".into(),
                message: "must be > 0".into(),
            });
        }
        if ai.insight_points == 0 {
            errors.push(ConfigError {
                field: "ai.insight_points".into(),
                message: "must be > 0".into(),
            });
        }
        if ai.enabled && !ai.base_url.starts_with("http") {
            errors.push(ConfigError {
                field: "ai.base_url".into(),
                message: format!("must be an http(s) URL, got \"{}\"", ai.base_url),
            });
        }

        match self.panel.to_panel() {
            Ok(panel) => {
                if let Err(e) = panel.validate() {
                    let field = match &e {
                        crate::sim::SimError::InvalidConfig { field, .. } => {
                            format!("panel.{field}")
                        }
                        crate::sim::SimError::UnknownVariant(_) => "panel.model".to_string(),
                    };
                    errors.push(ConfigError {
                        field,
                        message: e.to_string(),
                    });
                }
            }
            Err(e) => errors.push(e),
        }

        errors
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.panel;
        write!(
            f,
            "panel {:.4},{:.4} {} kWp tilt {}° azimuth {}° ({})",
            p.latitude, p.longitude, p.capacity_kw, p.tilt_deg, p.azimuth_deg, p.model
        )
    }
}
