//! Elevation lookup seam and batched resolution.
//!
//! Remote services cap the number of coordinates per request, so points are
//! sent in sequential batches and the answers concatenated in order.

use crate::error::{Result, TrailError};
use crate::models::{ElevationSeries, GeoPoint, Route, Trail};

/// Maximum coordinates per elevation request.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Source of ground elevations.
///
/// Implementations must return exactly one value per input point, in the same
/// order.
pub trait ElevationSource {
    fn lookup(&self, points: &[GeoPoint]) -> Result<Vec<f64>>;
}

impl<S: ElevationSource + ?Sized> ElevationSource for &S {
    fn lookup(&self, points: &[GeoPoint]) -> Result<Vec<f64>> {
        (**self).lookup(points)
    }
}

/// Format a coordinate component the way it is sent for lookup: two decimal
/// places. The precision loss is deliberate.
pub fn format_coordinate(value: f64) -> String {
    format!("{:.2}", value)
}

/// Resolve elevations for `points` in batches of at most `batch_size`.
///
/// The result is index-aligned with `points`. A failed batch aborts the whole
/// resolution.
pub fn resolve_elevations<S>(source: &S, points: &[GeoPoint], batch_size: usize) -> Result<ElevationSeries>
where
    S: ElevationSource + ?Sized,
{
    let batch_size = batch_size.max(1);
    let mut elevations = Vec::with_capacity(points.len());

    for (index, batch) in points.chunks(batch_size).enumerate() {
        tracing::debug!("Resolving elevation batch {} ({} points)", index, batch.len());
        let chunk = source.lookup(batch)?;
        if chunk.len() != batch.len() {
            return Err(TrailError::ElevationCountMismatch {
                expected: batch.len(),
                actual: chunk.len(),
            });
        }
        elevations.extend(chunk);
    }

    Ok(ElevationSeries::new(elevations))
}

/// Resolve elevations for `route` and pair them into a [`Trail`].
pub fn attach_elevations<S>(source: &S, route: Route, batch_size: usize) -> Result<Trail>
where
    S: ElevationSource + ?Sized,
{
    let elevations = resolve_elevations(source, route.points(), batch_size)?;
    Trail::new(route, elevations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Returns the latitude as elevation and records batch sizes.
    struct Recording {
        batches: RefCell<Vec<usize>>,
    }

    impl ElevationSource for Recording {
        fn lookup(&self, points: &[GeoPoint]) -> Result<Vec<f64>> {
            self.batches.borrow_mut().push(points.len());
            Ok(points.iter().map(|p| p.lat).collect())
        }
    }

    struct ShortChanging;

    impl ElevationSource for ShortChanging {
        fn lookup(&self, points: &[GeoPoint]) -> Result<Vec<f64>> {
            Ok(vec![0.0; points.len().saturating_sub(1)])
        }
    }

    fn points(n: usize) -> Vec<GeoPoint> {
        (0..n).map(|i| GeoPoint::unchecked(i as f64 * 0.01, 0.0)).collect()
    }

    #[test]
    fn batches_sequentially_and_preserves_order() {
        let source = Recording { batches: RefCell::new(Vec::new()) };
        let pts = points(250);
        let series = resolve_elevations(&source, &pts, DEFAULT_BATCH_SIZE).unwrap();

        assert_eq!(*source.batches.borrow(), vec![100, 100, 50]);
        assert_eq!(series.len(), 250);
        for (p, ele) in pts.iter().zip(series.values()) {
            assert_eq!(p.lat, *ele);
        }
    }

    #[test]
    fn zero_batch_size_means_one() {
        let source = Recording { batches: RefCell::new(Vec::new()) };
        resolve_elevations(&source, &points(3), 0).unwrap();
        assert_eq!(*source.batches.borrow(), vec![1, 1, 1]);
    }

    #[test]
    fn empty_input_makes_no_requests() {
        let source = Recording { batches: RefCell::new(Vec::new()) };
        let series = resolve_elevations(&source, &[], 100).unwrap();
        assert!(series.is_empty());
        assert!(source.batches.borrow().is_empty());
    }

    #[test]
    fn short_response_is_an_error() {
        let err = resolve_elevations(&ShortChanging, &points(5), 100).unwrap_err();
        assert!(matches!(
            err,
            TrailError::ElevationCountMismatch { expected: 5, actual: 4 }
        ));
    }

    #[test]
    fn coordinates_round_to_two_decimals() {
        assert_eq!(format_coordinate(55.6112176), "55.61");
        assert_eq!(format_coordinate(-1.7025507), "-1.70");
        assert_eq!(format_coordinate(-3.0015480), "-3.00");
    }
}
