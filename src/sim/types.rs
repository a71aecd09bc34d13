//! Core simulator types: panel configuration, model variants, and forecast data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of hourly points in every forecast.
pub const HOURS_PER_DAY: usize = 24;

/// Errors raised by the curve simulator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A panel parameter is outside its accepted range.
    #[error("invalid config: {field} {message}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
    /// A model name could not be mapped to a variant.
    #[error("unknown model variant \"{0}\" (expected physics, ml or deep)")]
    UnknownVariant(String),
}

/// Selects which synthetic curve formula the simulator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelVariant {
    /// Smooth sine arc with light uniform noise.
    #[default]
    #[serde(alias = "PHYSICS_BASED")]
    Physics,
    /// Sine arc with two randomized cloud dips and heavier noise.
    MlStatistical,
    /// Narrower daylight window, fixed atmospheric dips, oscillatory detail.
    DeepLearning,
}

impl ModelVariant {
    /// All variants in display order.
    pub const ALL: [ModelVariant; 3] = [
        ModelVariant::Physics,
        ModelVariant::MlStatistical,
        ModelVariant::DeepLearning,
    ];

    /// Human-readable label used in prompts and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            ModelVariant::Physics => "Physics-based Model",
            ModelVariant::MlStatistical => "ML Statistical Model",
            ModelVariant::DeepLearning => "Deep Learning Model",
        }
    }

    /// Whether two runs with the same panel config always agree.
    pub fn is_deterministic(self) -> bool {
        matches!(self, ModelVariant::DeepLearning)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelVariant {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "physics" | "physics_based" | "physics_based_model" => Ok(ModelVariant::Physics),
            "ml" | "ml_statistical" | "ml_statistical_model" => Ok(ModelVariant::MlStatistical),
            "deep" | "deep_learning" | "deep_learning_model" => Ok(ModelVariant::DeepLearning),
            _ => Err(SimError::UnknownVariant(s.to_string())),
        }
    }
}

/// Photovoltaic installation parameters, immutable for the duration of one call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Site latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Site longitude in degrees (-180 to 180).
    pub longitude: f64,
    /// Nameplate peak output (kWp, >= 0).
    pub capacity_kw: f64,
    /// Mounting angle from horizontal in degrees (0 to 90).
    pub tilt_deg: f64,
    /// Compass facing in degrees from north (0 inclusive to 360 exclusive).
    pub azimuth_deg: f64,
    /// Curve formula to run.
    pub model: ModelVariant,
}

impl PanelConfig {
    /// Checks every field and returns the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), SimError> {
        check_range("latitude", self.latitude, -90.0, 90.0, true)?;
        check_range("longitude", self.longitude, -180.0, 180.0, true)?;
        if !self.capacity_kw.is_finite() || self.capacity_kw < 0.0 {
            return Err(SimError::InvalidConfig {
                field: "capacity_kw",
                message: format!("must be a finite value >= 0, got {}", self.capacity_kw),
            });
        }
        check_range("tilt_deg", self.tilt_deg, 0.0, 90.0, true)?;
        check_range("azimuth_deg", self.azimuth_deg, 0.0, 360.0, false)?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    max_inclusive: bool,
) -> Result<(), SimError> {
    let upper_ok = if max_inclusive {
        value <= max
    } else {
        value < max
    };
    if value.is_finite() && value >= min && upper_ok {
        return Ok(());
    }
    let close = if max_inclusive { ']' } else { ')' };
    Err(SimError::InvalidConfig {
        field,
        message: format!("must be in [{min}, {max}{close}, got {value}"),
    })
}

/// Power output for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Hour of day, 0 to 23.
    pub hour: u8,
    /// Output in kW, rounded to two decimals.
    pub power_kw: f64,
}

impl ForecastPoint {
    /// Chart label for the hour, e.g. `"07:00"`.
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Ordered 24-point hourly forecast.
///
/// Always holds exactly one point per hour in ascending order; constructed
/// only by the simulator or by [`crate::forecast::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
}

impl Forecast {
    pub(crate) fn from_sorted(points: Vec<ForecastPoint>) -> Self {
        debug_assert_eq!(points.len(), HOURS_PER_DAY);
        Self { points }
    }

    /// The hourly points, ascending by hour.
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Iterates the points in hour order.
    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.points.iter()
    }

    /// Number of points (always [`HOURS_PER_DAY`]).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Output at `hour`, or `None` if the hour is out of range.
    pub fn power_at(&self, hour: usize) -> Option<f64> {
        self.points.get(hour).map(|p| p.power_kw)
    }
}

impl<'a> IntoIterator for &'a Forecast {
    type Item = &'a ForecastPoint;
    type IntoIter = std::slice::Iter<'a, ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}  {:>7.2} kW", p.label(), p.power_kw)?;
        }
        Ok(())
    }
}
