//! Scripted cloud and atmospheric dips that temporarily reduce output.

use super::noise::NoiseSource;

/// Fractional output reduction applied while a dip is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reduction {
    /// Always the same fraction.
    Fixed(f64),
    /// Uniform in `[min, min + spread)`, resolved once per simulation run.
    Range {
        /// Smallest possible reduction.
        min: f64,
        /// Width of the reduction range.
        spread: f64,
    },
}

impl Reduction {
    /// Resolves the reduction, drawing from `noise` only for ranges.
    pub fn resolve<N: NoiseSource + ?Sized>(&self, noise: &mut N) -> f64 {
        match *self {
            Reduction::Fixed(r) => r,
            Reduction::Range { min, spread } => min + noise.next_unit() * spread,
        }
    }
}

/// Temporary occlusion spanning `[start_hr, end_hr)` in fractional hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipEvent {
    /// Start hour (inclusive).
    pub start_hr: f64,
    /// End hour (exclusive).
    pub end_hr: f64,
    /// Reduction while active.
    pub reduction: Reduction,
}

impl DipEvent {
    /// Creates a dip spanning `[start_hr, end_hr)`.
    ///
    /// # Panics
    ///
    /// Panics if `start_hr >= end_hr`.
    pub fn new(start_hr: f64, end_hr: f64, reduction: Reduction) -> Self {
        assert!(start_hr < end_hr);
        Self {
            start_hr,
            end_hr,
            reduction,
        }
    }

    /// Creates a dip of `duration_hr` starting at `start_hr`.
    pub fn lasting(start_hr: f64, duration_hr: f64, reduction: Reduction) -> Self {
        Self::new(start_hr, start_hr + duration_hr, reduction)
    }

    /// Returns `true` when `hour` falls within the window.
    pub fn is_active(&self, hour: f64) -> bool {
        hour >= self.start_hr && hour < self.end_hr
    }

    /// Draws the concrete reduction for one run.
    pub fn resolve<N: NoiseSource + ?Sized>(&self, noise: &mut N) -> ResolvedDip {
        ResolvedDip {
            event: *self,
            reduction: self.reduction.resolve(noise),
        }
    }
}

/// A dip whose reduction has been fixed for the current run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDip {
    /// The window this dip was drawn from.
    pub event: DipEvent,
    /// Reduction fraction in `[0, 1)`.
    pub reduction: f64,
}

impl ResolvedDip {
    /// Multiplier for `hour`: `1 - reduction` inside the window, otherwise 1.
    pub fn factor_at(&self, hour: f64) -> f64 {
        if self.event.is_active(hour) {
            1.0 - self.reduction
        } else {
            1.0
        }
    }
}
