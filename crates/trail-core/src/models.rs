//! Core data models for trail generation.

use crate::error::{Result, TrailError};
use crate::geodesy::haversine_distance;
use serde::{Deserialize, Serialize};

/// A position in decimal degrees on a spherical WGS84 earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a validated point.
    ///
    /// Fails with [`TrailError::InvalidCoordinate`] when either component is
    /// non-finite or outside [-90, 90] / [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let point = Self { lat, lon };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(TrailError::InvalidCoordinate { lat, lon })
        }
    }

    /// Create a point without range checks. Used for values produced by the
    /// geodesy functions, which can drift marginally past the bounds.
    pub const fn unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Ordered sequence of points; the first and last are the trail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    points: Vec<GeoPoint>,
}

impl Route {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    pub fn end(&self) -> Option<&GeoPoint> {
        self.points.last()
    }

    /// Sum of great-circle legs between consecutive points, in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_distance(pair[0], pair[1]))
            .sum()
    }
}

/// Ground elevations in meters, index-aligned with a route's points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevationSeries {
    values: Vec<f64>,
}

impl ElevationSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A route paired with its elevations, ready to be written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    route: Route,
    elevations: ElevationSeries,
}

impl Trail {
    pub fn new(route: Route, elevations: ElevationSeries) -> Result<Self> {
        if route.len() != elevations.len() {
            return Err(TrailError::ElevationCountMismatch {
                expected: route.len(),
                actual: elevations.len(),
            });
        }
        Ok(Self { route, elevations })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn elevations(&self) -> &ElevationSeries {
        &self.elevations
    }

    pub fn len(&self) -> usize {
        self.route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// Iterate `(point, elevation_m)` pairs in route order.
    pub fn samples(&self) -> impl Iterator<Item = (&GeoPoint, f64)> + '_ {
        self.route
            .points()
            .iter()
            .zip(self.elevations.values().iter().copied())
    }
}

/// Parameters of the normal distribution used for perpendicular offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationParams {
    /// Mean offset in meters (positive = right of travel)
    pub mean_m: f64,
    /// Standard deviation of the offset in meters
    pub stddev_m: f64,
}

impl Default for DeviationParams {
    fn default() -> Self {
        Self {
            mean_m: 0.0,
            stddev_m: 100.0,
        }
    }
}
