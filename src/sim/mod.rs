/// Scripted dip windows and their reductions.
pub mod dip;
/// Injectable random source for perturbations and dip draws.
pub mod noise;
/// The curve generator shared by every model variant.
pub mod simulator;
/// Daily totals and peak statistics for a forecast.
pub mod summary;
/// Panel config, model variants, and forecast types.
pub mod types;
/// Per-variant sunrise, sunset, dip, and perturbation parameters.
pub mod variant;

pub use noise::{FixedNoise, NoiseSource, SeededNoise};
pub use simulator::{CurveSimulator, simulate};
pub use summary::ForecastSummary;
pub use types::{Forecast, ForecastPoint, HOURS_PER_DAY, ModelVariant, PanelConfig, SimError};
