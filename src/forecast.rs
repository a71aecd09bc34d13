//! Normalization of hourly series produced outside the simulator.

use thiserror::Error;

use crate::sim::types::{Forecast, ForecastPoint, HOURS_PER_DAY};

/// Reasons an external hourly series cannot become a [`Forecast`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// Wrong number of points.
    #[error("expected {HOURS_PER_DAY} hourly points, got {0}")]
    WrongLength(usize),
    /// An hour outside 0..=23.
    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u8),
    /// The same hour appears twice.
    #[error("hour {0} appears more than once")]
    DuplicateHour(u8),
    /// Negative, NaN, or infinite output.
    #[error("hour {hour} has invalid power {power_kw}")]
    InvalidPower {
        /// Offending hour.
        hour: u8,
        /// Offending value.
        power_kw: f64,
    },
}

/// Sorts `points` by hour and checks that every hour 0..=23 appears once.
///
/// Series coming back from the text-generation service are not guaranteed to
/// be ordered; consumers only ever see the normalized form.
///
/// # Errors
///
/// Returns a [`ForecastError`] describing the first violation found.
pub fn normalize(mut points: Vec<ForecastPoint>) -> Result<Forecast, ForecastError> {
    if points.len() != HOURS_PER_DAY {
        return Err(ForecastError::WrongLength(points.len()));
    }

    points.sort_by_key(|p| p.hour);

    if let Some(p) = points.iter().find(|p| usize::from(p.hour) >= HOURS_PER_DAY) {
        return Err(ForecastError::HourOutOfRange(p.hour));
    }
    // In range with the right length: no repeats means every hour is present.
    if let Some(w) = points.windows(2).find(|w| w[0].hour == w[1].hour) {
        return Err(ForecastError::DuplicateHour(w[0].hour));
    }
    if let Some(p) = points
        .iter()
        .find(|p| !p.power_kw.is_finite() || p.power_kw < 0.0)
    {
        return Err(ForecastError::InvalidPower {
            hour: p.hour,
            power_kw: p.power_kw,
        });
    }

    Ok(Forecast::from_sorted(points))
}
