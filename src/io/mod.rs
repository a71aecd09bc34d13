//! Output writers for forecasts.

pub mod export;
