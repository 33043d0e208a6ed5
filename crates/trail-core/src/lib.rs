//! Trail Core - geodesy, route planning and deviation simulation
//!
//! Builds a "planned" great-circle walking route between two coordinates and
//! an "executed" variant that wanders sideways off it.

pub mod deviation;
pub mod elevation;
pub mod error;
pub mod geodesy;
pub mod models;
pub mod planner;

pub use deviation::simulate_execution;
pub use elevation::{
    attach_elevations, format_coordinate, resolve_elevations, ElevationSource, DEFAULT_BATCH_SIZE,
};
pub use error::{Result, TrailError};
pub use geodesy::{
    haversine_distance, initial_bearing, intermediate_point, is_antipodal, offset_perpendicular,
    EARTH_RADIUS_M,
};
pub use models::{DeviationParams, ElevationSeries, GeoPoint, Route, Trail};
pub use planner::{plan_route, point_count, DEFAULT_INTERVAL_M, MAX_ROUTE_POINTS};
