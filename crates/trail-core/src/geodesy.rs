//! Spherical geodesy for trail generation: distance, bearing, great-circle
//! interpolation and perpendicular offsets.
//!
//! All functions treat the earth as a sphere of radius [`EARTH_RADIUS_M`].

use crate::models::GeoPoint;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Angular separations with a sine below this are treated as degenerate
/// (coincident or antipodal endpoints).
const DEGENERATE_SIN_EPS: f64 = 1e-12;

/// Latitude beyond which the planar offset approximation is considered poor.
pub const PLANAR_OFFSET_MAX_ABS_LAT: f64 = 80.0;

/// Central angle between two points in radians (haversine form).
fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1].
    let h = h.clamp(0.0, 1.0);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Great-circle distance between two points in meters (haversine formula).
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    EARTH_RADIUS_M * central_angle(a, b)
}

/// Initial compass bearing from `a` to `b` along the great circle.
///
/// Returns degrees in `[0, 360)`, 0 = north, 90 = east.
pub fn initial_bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let bearing = (x.atan2(y).to_degrees() + 360.0) % 360.0;
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// True when `a` and `b` sit on opposite ends of a diameter, so infinitely
/// many great circles join them.
pub fn is_antipodal(a: GeoPoint, b: GeoPoint) -> bool {
    let delta_sigma = central_angle(a, b);
    delta_sigma > std::f64::consts::FRAC_PI_2 && delta_sigma.sin().abs() < DEGENERATE_SIN_EPS
}

/// Point at `fraction` of the way from `a` to `b` along the great circle.
///
/// `fraction` 0 yields `a` and 1 yields `b` (within rounding). When the
/// endpoints coincide or are antipodal the great circle is undefined and `a`
/// is returned instead of propagating NaN.
pub fn intermediate_point(a: GeoPoint, b: GeoPoint, fraction: f64) -> GeoPoint {
    let delta_sigma = central_angle(a, b);
    let sin_sigma = delta_sigma.sin();
    if sin_sigma.abs() < DEGENERATE_SIN_EPS {
        return a;
    }

    let phi1 = a.lat.to_radians();
    let lambda1 = a.lon.to_radians();
    let phi2 = b.lat.to_radians();
    let lambda2 = b.lon.to_radians();

    let wa = ((1.0 - fraction) * delta_sigma).sin() / sin_sigma;
    let wb = (fraction * delta_sigma).sin() / sin_sigma;

    let x = wa * phi1.cos() * lambda1.cos() + wb * phi2.cos() * lambda2.cos();
    let y = wa * phi1.cos() * lambda1.sin() + wb * phi2.cos() * lambda2.sin();
    let z = wa * phi1.sin() + wb * phi2.sin();

    let phi = z.atan2((x * x + y * y).sqrt());
    let lambda = y.atan2(x);

    GeoPoint::unchecked(phi.to_degrees(), lambda.to_degrees())
}

/// Move `point` by `distance_m` perpendicular to a path heading of
/// `path_bearing_deg`.
///
/// Positive distances move toward `path_bearing_deg + 90` (right of travel),
/// negative ones to the left.
///
/// This is a planar small-angle approximation, not a spherical offset: the
/// longitude delta is scaled by `1 / cos(lat)` and so blows up toward the
/// poles. It is accurate for short offsets on temperate-latitude trails.
pub fn offset_perpendicular(point: GeoPoint, path_bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let theta = (path_bearing_deg + 90.0).to_radians();
    let d = distance_m / EARTH_RADIUS_M;

    let d_lat = d * theta.cos();
    let d_lon = d * theta.sin() / point.lat.to_radians().cos();

    GeoPoint::unchecked(point.lat + d_lat.to_degrees(), point.lon + d_lon.to_degrees())
}
