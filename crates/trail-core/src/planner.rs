//! Planned route generation along the great circle between two endpoints.

use crate::error::{Result, TrailError};
use crate::geodesy::{
    haversine_distance, intermediate_point, is_antipodal, PLANAR_OFFSET_MAX_ABS_LAT,
};
use crate::models::{GeoPoint, Route};

/// Default spacing between consecutive route points in meters.
pub const DEFAULT_INTERVAL_M: f64 = 100.0;

/// Upper bound on points per route; one point per meter around the equator
/// is roughly 40 million.
pub const MAX_ROUTE_POINTS: usize = 50_000_000;

/// Number of points for a route of `distance_m` sampled every `interval_m`.
///
/// `floor(distance / interval) + 1`, never fewer than two so both endpoints
/// are always present. Counts above [`MAX_ROUTE_POINTS`] fail with
/// [`TrailError::TooManyPoints`].
pub fn point_count(distance_m: f64, interval_m: f64) -> Result<usize> {
    let requested = (distance_m / interval_m).floor() + 1.0;
    if !requested.is_finite() || requested > MAX_ROUTE_POINTS as f64 {
        return Err(TrailError::TooManyPoints {
            requested,
            max: MAX_ROUTE_POINTS,
        });
    }
    Ok((requested as usize).max(2))
}

/// Build an evenly spaced route from `start` to `end`.
///
/// Points are sampled at equal fractions of the great circle. The first and
/// last points are exactly `start` and `end`. Identical endpoints produce the
/// two-point route `[start, end]`.
pub fn plan_route(start: GeoPoint, end: GeoPoint, interval_m: f64) -> Result<Route> {
    let start = GeoPoint::new(start.lat, start.lon)?;
    let end = GeoPoint::new(end.lat, end.lon)?;
    if !interval_m.is_finite() || interval_m <= 0.0 {
        return Err(TrailError::InvalidInterval(interval_m));
    }

    if is_antipodal(start, end) {
        return Err(TrailError::AntipodalEndpoints { start, end });
    }

    if start.lat.abs() > PLANAR_OFFSET_MAX_ABS_LAT || end.lat.abs() > PLANAR_OFFSET_MAX_ABS_LAT {
        tracing::warn!(
            "Route endpoint beyond {}° latitude; perpendicular offsets will be inaccurate",
            PLANAR_OFFSET_MAX_ABS_LAT
        );
    }

    let total_distance = haversine_distance(start, end);
    let num_points = point_count(total_distance, interval_m)?;
    let last = num_points - 1;

    let points = (0..num_points)
        .map(|i| match i {
            0 => start,
            i if i == last => end,
            i => intermediate_point(start, end, i as f64 / last as f64),
        })
        .collect();

    tracing::debug!(
        "Planned route: {:.1} m, {} points every {} m",
        total_distance,
        num_points,
        interval_m
    );

    Ok(Route::new(points))
}
