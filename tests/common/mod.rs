//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use pv_forecast::sim::{ModelVariant, PanelConfig};

/// Manhattan rooftop: 5 kW, 20° tilt, south-facing.
pub fn nyc_panel(model: ModelVariant) -> PanelConfig {
    PanelConfig {
        latitude: 40.7128,
        longitude: -74.006,
        capacity_kw: 5.0,
        tilt_deg: 20.0,
        azimuth_deg: 180.0,
        model,
    }
}

/// Same site with a different nameplate capacity.
pub fn nyc_panel_with_capacity(model: ModelVariant, capacity_kw: f64) -> PanelConfig {
    PanelConfig {
        capacity_kw,
        ..nyc_panel(model)
    }
}

/// Undamped bell-curve value for a 6-to-18 daylight window.
pub fn physics_base(hour: u8, capacity_kw: f64) -> f64 {
    if !(6..=18).contains(&hour) {
        return 0.0;
    }
    let angle = f64::from(hour - 6) / 12.0 * std::f64::consts::PI;
    angle.sin() * capacity_kw
}
