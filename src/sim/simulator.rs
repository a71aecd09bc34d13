//! Parameterized hourly curve generator shared by every model variant.

use tracing::debug;

use super::noise::{NoiseSource, SeededNoise};
use super::types::{Forecast, ForecastPoint, HOURS_PER_DAY, PanelConfig, SimError};
use super::variant::VariantProfile;

/// Stateless generator mapping a panel config to a 24-point forecast.
///
/// Calls are independent and may run concurrently; all randomness comes
/// from the [`NoiseSource`] handed to [`CurveSimulator::simulate`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CurveSimulator;

impl CurveSimulator {
    /// Validates `config` and produces one forecast.
    ///
    /// Randomized dip reductions are drawn first, in dip order, followed by
    /// one perturbation draw per hour for uniform-noise variants. A seeded
    /// source therefore yields the same forecast on every call.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if any panel field is out of range.
    pub fn simulate<N: NoiseSource + ?Sized>(
        &self,
        config: &PanelConfig,
        noise: &mut N,
    ) -> Result<Forecast, SimError> {
        config.validate()?;
        let profile = config.model.profile();
        let points = curve(&profile, config, noise);
        debug!(
            model = %config.model,
            deterministic = config.model.is_deterministic(),
            capacity_kw = config.capacity_kw,
            noise_kw = profile.perturbation.amplitude(config.capacity_kw),
            peak_kw = points.iter().map(|p| p.power_kw).fold(0.0, f64::max),
            "simulated forecast"
        );
        Ok(Forecast::from_sorted(points))
    }

    /// Produces one forecast with OS-seeded noise (not reproducible).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if any panel field is out of range.
    pub fn simulate_unseeded(&self, config: &PanelConfig) -> Result<Forecast, SimError> {
        self.simulate(config, &mut SeededNoise::from_entropy())
    }

    /// Produces one forecast from a fixed seed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if any panel field is out of range.
    pub fn simulate_seeded(&self, config: &PanelConfig, seed: u64) -> Result<Forecast, SimError> {
        self.simulate(config, &mut SeededNoise::from_seed(seed))
    }
}

/// Convenience wrapper for [`CurveSimulator::simulate_unseeded`].
///
/// # Errors
///
/// Returns [`SimError::InvalidConfig`] if any panel field is out of range.
pub fn simulate(config: &PanelConfig) -> Result<Forecast, SimError> {
    CurveSimulator.simulate_unseeded(config)
}

fn curve<N: NoiseSource + ?Sized>(
    profile: &VariantProfile,
    config: &PanelConfig,
    noise: &mut N,
) -> Vec<ForecastPoint> {
    let dips: Vec<_> = profile.dips.iter().map(|d| d.resolve(noise)).collect();
    let capacity = config.capacity_kw;

    (0..HOURS_PER_DAY)
        .map(|i| {
            let hour = i as f64;
            let mut power = 0.0;
            if profile.is_daylight(hour) {
                power = profile.arc_angle(hour).sin() * capacity * profile.peak_factor;
                for dip in &dips {
                    power *= dip.factor_at(hour);
                }
            }
            power += profile
                .perturbation
                .sample(hour, capacity, config.latitude, noise);

            ForecastPoint {
                hour: i as u8,
                power_kw: round_kw(power.max(0.0)),
            }
        })
        .collect()
}

/// Rounds to two decimals, half away from zero.
fn round_kw(kw: f64) -> f64 {
    (kw * 100.0).round() / 100.0
}
