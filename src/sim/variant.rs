//! Per-variant curve parameters.
//!
//! The three model variants share one algorithm and differ only in the
//! record built here: daylight window, peak factor, dip events, and the
//! shape of the additive perturbation.

use super::dip::{DipEvent, Reduction};
use super::noise::NoiseSource;
use super::types::ModelVariant;

/// Additive per-hour perturbation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Perturbation {
    /// Uniform in `±capacity / half_width_divisor`, one draw per hour.
    Uniform {
        /// Divisor applied to capacity to get the half-width.
        half_width_divisor: f64,
    },
    /// `sin(hour * frequency + latitude) * capacity / divisor`, no draws.
    Oscillatory {
        /// Angular step per hour (radians).
        frequency: f64,
        /// Divisor applied to capacity to get the amplitude.
        divisor: f64,
    },
}

impl Perturbation {
    /// Largest absolute value this perturbation can add for `capacity_kw`.
    pub fn amplitude(&self, capacity_kw: f64) -> f64 {
        match *self {
            Perturbation::Uniform { half_width_divisor } => capacity_kw / half_width_divisor,
            Perturbation::Oscillatory { divisor, .. } => capacity_kw / divisor,
        }
    }

    /// Perturbation for `hour`, drawing from `noise` when uniform.
    pub fn sample<N: NoiseSource + ?Sized>(
        &self,
        hour: f64,
        capacity_kw: f64,
        latitude: f64,
        noise: &mut N,
    ) -> f64 {
        match *self {
            Perturbation::Uniform { half_width_divisor } => {
                (2.0 * noise.next_unit() - 1.0) * capacity_kw / half_width_divisor
            }
            Perturbation::Oscillatory { frequency, divisor } => {
                (hour * frequency + latitude).sin() * capacity_kw / divisor
            }
        }
    }
}

/// Everything that distinguishes one variant's curve from another.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantProfile {
    /// Sunrise in fractional hours (inclusive).
    pub sunrise_hr: f64,
    /// Sunset in fractional hours (inclusive).
    pub sunset_hr: f64,
    /// Multiplier on capacity at the top of the arc.
    pub peak_factor: f64,
    /// Dip events, applied in order.
    pub dips: Vec<DipEvent>,
    /// Additive noise shape.
    pub perturbation: Perturbation,
}

impl VariantProfile {
    /// Returns `true` when `hour` lies within `[sunrise, sunset]`.
    pub fn is_daylight(&self, hour: f64) -> bool {
        hour >= self.sunrise_hr && hour <= self.sunset_hr
    }

    /// Position along the daylight arc, `0` at sunrise and `π` at sunset.
    pub fn arc_angle(&self, hour: f64) -> f64 {
        (hour - self.sunrise_hr) / (self.sunset_hr - self.sunrise_hr) * std::f64::consts::PI
    }
}

impl ModelVariant {
    /// Builds the curve parameters for this variant.
    pub fn profile(self) -> VariantProfile {
        match self {
            ModelVariant::Physics => VariantProfile {
                sunrise_hr: 6.0,
                sunset_hr: 18.0,
                peak_factor: 1.0,
                dips: Vec::new(),
                perturbation: Perturbation::Uniform {
                    half_width_divisor: 40.0,
                },
            },
            ModelVariant::MlStatistical => VariantProfile {
                sunrise_hr: 6.0,
                sunset_hr: 18.0,
                peak_factor: 1.0,
                dips: vec![
                    DipEvent::new(
                        10.0,
                        11.0,
                        Reduction::Range {
                            min: 0.4,
                            spread: 0.2,
                        },
                    ),
                    DipEvent::new(
                        14.0,
                        15.5,
                        Reduction::Range {
                            min: 0.3,
                            spread: 0.3,
                        },
                    ),
                ],
                perturbation: Perturbation::Uniform {
                    half_width_divisor: 30.0,
                },
            },
            ModelVariant::DeepLearning => VariantProfile {
                sunrise_hr: 6.25,
                sunset_hr: 17.75,
                peak_factor: 1.02,
                dips: vec![
                    DipEvent::lasting(9.5, 0.5, Reduction::Fixed(0.3)),
                    DipEvent::lasting(13.0, 1.0, Reduction::Fixed(0.7)),
                    DipEvent::lasting(16.0, 0.75, Reduction::Fixed(0.2)),
                ],
                perturbation: Perturbation::Oscillatory {
                    frequency: 2.5,
                    divisor: 40.0,
                },
            },
        }
    }
}
