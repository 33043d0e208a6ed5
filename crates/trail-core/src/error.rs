//! Error types for trail generation.

use crate::models::GeoPoint;
use thiserror::Error;

/// Failures surfaced by the planner, simulator and elevation resolver.
#[derive(Debug, Error)]
pub enum TrailError {
    #[error("invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("invalid interval {0} m: must be a finite value greater than zero")]
    InvalidInterval(f64),

    #[error("route would need {requested:.0} points, more than the limit of {max}")]
    TooManyPoints { requested: f64, max: usize },

    #[error("endpoints {start:?} and {end:?} are antipodal: the great circle between them is undefined")]
    AntipodalEndpoints { start: GeoPoint, end: GeoPoint },

    #[error("invalid deviation (mean {mean} m, stddev {stddev} m): stddev must be finite and non-negative")]
    InvalidDeviation { mean: f64, stddev: f64 },

    #[error("elevation count mismatch: expected {expected}, got {actual}")]
    ElevationCountMismatch { expected: usize, actual: usize },

    #[error("elevation service error: {0}")]
    ElevationService(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, TrailError>;
