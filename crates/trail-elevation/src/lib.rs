//! Trail Elevation - Open-Meteo elevation client
//!
//! Implements [`trail_core::ElevationSource`] over the Open-Meteo elevation
//! REST API.

pub mod client;
pub mod config;

pub use client::{ElevationError, OpenMeteoClient};
pub use config::ElevationConfig;
