//! Simulated "executed" routes that wander off the planned path.

use crate::error::{Result, TrailError};
use crate::geodesy::{initial_bearing, offset_perpendicular};
use crate::models::{DeviationParams, Route};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Perturb every interior point of `route` sideways by a normally
/// distributed distance.
///
/// The local path direction at point `i` is the bearing from `i - 1` to
/// `i + 1`. Endpoints are copied unchanged and the point count is preserved;
/// routes with fewer than three points come back as-is.
pub fn simulate_execution<R>(route: &Route, params: DeviationParams, rng: &mut R) -> Result<Route>
where
    R: Rng + ?Sized,
{
    let invalid = || TrailError::InvalidDeviation {
        mean: params.mean_m,
        stddev: params.stddev_m,
    };
    if !params.mean_m.is_finite() || !params.stddev_m.is_finite() || params.stddev_m < 0.0 {
        return Err(invalid());
    }
    let normal = Normal::new(params.mean_m, params.stddev_m).map_err(|_| invalid())?;

    let points = route.points();
    let n = points.len();
    if n < 3 {
        return Ok(route.clone());
    }

    let mut executed = Vec::with_capacity(n);
    executed.push(points[0]);
    for i in 1..n - 1 {
        let bearing = initial_bearing(points[i - 1], points[i + 1]);
        let offset_m: f64 = normal.sample(rng);
        executed.push(offset_perpendicular(points[i], bearing, offset_m));
    }
    executed.push(points[n - 1]);

    tracing::debug!(
        "Simulated execution of {} points (mean {} m, stddev {} m)",
        n,
        params.mean_m,
        params.stddev_m
    );

    Ok(Route::new(executed))
}
