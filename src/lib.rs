//! Synthetic hourly solar PV forecasts.
//!
//! The core is [`sim::CurveSimulator`], which turns a panel configuration
//! and a model variant into a 24-point power curve. With the `api` feature
//! the crate also ships an HTTP front end and a client for a hosted
//! text-generation model that can stand in for the simulator, narrate a
//! forecast, or answer questions about it.

#[cfg(feature = "api")]
pub mod ai;
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod forecast;
pub mod io;
/// Curve simulator, model variants, and forecast types.
pub mod sim;
pub mod telemetry;
