//! Post-hoc statistics derived from a finished forecast.

use std::fmt;

use serde::Serialize;

use super::types::Forecast;

/// Aggregate figures for one 24-hour forecast.
///
/// Computed from the forecast points alone, so the same summary applies to
/// simulated and externally produced forecasts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    /// Hour with the highest output (earliest on ties).
    pub peak_hour: u8,
    /// Highest hourly output (kW).
    pub peak_kw: f64,
    /// Daily energy, summing 1-hour steps (kWh).
    pub total_kwh: f64,
    /// Number of hours with non-zero output.
    pub productive_hours: usize,
    /// `total_kwh / (capacity * 24)`, or `0.0` for zero capacity.
    pub capacity_factor: f64,
}

impl ForecastSummary {
    /// Summarizes `forecast` against the nameplate `capacity_kw`.
    pub fn from_forecast(forecast: &Forecast, capacity_kw: f64) -> Self {
        let mut peak_hour = 0_u8;
        let mut peak_kw = 0.0_f64;
        let mut total_kwh = 0.0_f64;
        let mut productive_hours = 0_usize;

        for p in forecast {
            if p.power_kw > peak_kw {
                peak_kw = p.power_kw;
                peak_hour = p.hour;
            }
            total_kwh += p.power_kw;
            if p.power_kw > 0.0 {
                productive_hours += 1;
            }
        }

        let capacity_factor = if capacity_kw > 0.0 {
            total_kwh / (capacity_kw * forecast.len() as f64)
        } else {
            0.0
        };

        Self {
            peak_hour,
            peak_kw,
            total_kwh,
            productive_hours,
            capacity_factor,
        }
    }
}

impl fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Forecast Summary ---")?;
        writeln!(
            f,
            "Peak output:        {:.2} kW at {:02}:00",
            self.peak_kw, self.peak_hour
        )?;
        writeln!(f, "Daily energy:       {:.2} kWh", self.total_kwh)?;
        writeln!(f, "Productive hours:   {}", self.productive_hours)?;
        write!(f, "Capacity factor:    {:.1}%", self.capacity_factor * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::noise::FixedNoise;
    use crate::sim::simulator::CurveSimulator;
    use crate::sim::types::{ModelVariant, PanelConfig};

    fn physics_forecast(capacity_kw: f64) -> Forecast {
        let cfg = PanelConfig {
            latitude: 51.5,
            longitude: 0.0,
            capacity_kw,
            tilt_deg: 30.0,
            azimuth_deg: 180.0,
            model: ModelVariant::Physics,
        };
        CurveSimulator
            .simulate(&cfg, &mut FixedNoise::midpoint())
            .expect("valid config")
    }

    #[test]
    fn peak_is_solar_noon() {
        let summary = ForecastSummary::from_forecast(&physics_forecast(5.0), 5.0);
        assert_eq!(summary.peak_hour, 12);
        assert_eq!(summary.peak_kw, 5.0);
        // Hours 7..=17 are strictly positive; 6 and 18 round to zero.
        assert_eq!(summary.productive_hours, 11);
        assert!(summary.total_kwh > 35.0 && summary.total_kwh < 40.0);
        assert!(summary.capacity_factor > 0.29 && summary.capacity_factor < 0.34);
    }

    #[test]
    fn zero_capacity_summary_is_all_zero() {
        let summary = ForecastSummary::from_forecast(&physics_forecast(0.0), 0.0);
        assert_eq!(summary.peak_kw, 0.0);
        assert_eq!(summary.total_kwh, 0.0);
        assert_eq!(summary.productive_hours, 0);
        assert_eq!(summary.capacity_factor, 0.0);
    }

    #[test]
    fn display_contains_headline_figures() {
        let summary = ForecastSummary::from_forecast(&physics_forecast(5.0), 5.0);
        let text = summary.to_string();
        assert!(text.contains("Peak output"));
        assert!(text.contains("12:00"));
    }
}
