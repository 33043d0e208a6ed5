//! End-to-end pipeline tests with a fake elevation source.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use trail_cli::{run_pipeline, PipelineOptions};
use trail_core::{DeviationParams, ElevationSource, GeoPoint, TrailError};

/// Deterministic terrain: elevation rises with latitude.
struct SlopeTerrain {
    calls: Cell<usize>,
}

impl ElevationSource for SlopeTerrain {
    fn lookup(&self, points: &[GeoPoint]) -> trail_core::Result<Vec<f64>> {
        self.calls.set(self.calls.get() + 1);
        Ok(points.iter().map(|p| (p.lat - 54.0) * 100.0).collect())
    }
}

struct Offline;

impl ElevationSource for Offline {
    fn lookup(&self, _points: &[GeoPoint]) -> trail_core::Result<Vec<f64>> {
        Err(TrailError::ElevationService("connection refused".into()))
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("trail-cli-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn options(output_dir: &Path) -> PipelineOptions {
    let mut options = PipelineOptions::new(
        GeoPoint::unchecked(55.6112176200343, -1.702550745082108),
        GeoPoint::unchecked(54.97818870154609, -3.001548002556341),
    );
    options.interval_m = 1_000.0;
    options.deviation = DeviationParams {
        mean_m: 0.0,
        stddev_m: 25.0,
    };
    options.output_dir = output_dir.to_path_buf();
    options
}

fn read_gpx(path: &Path) -> gpx::Gpx {
    let file = File::open(path).expect("open gpx");
    gpx::read(BufReader::new(file)).expect("parse gpx")
}

#[test]
fn writes_planned_and_executed_trails() {
    let dir = scratch_dir("pipeline");
    let options = options(&dir);
    let source = SlopeTerrain { calls: Cell::new(0) };
    let mut rng = StdRng::seed_from_u64(11);

    let report = run_pipeline(&options, &source, &mut rng).expect("pipeline");

    let n = report.planned.trail.len();
    assert_eq!(n, 109);
    assert_eq!(report.executed.trail.len(), n);
    // 109 points per trail in batches of 100: two requests each.
    assert_eq!(source.calls.get(), 4);
    assert_eq!(report.planned.path, dir.join("planned_trail.gpx"));
    assert_eq!(report.executed.path, dir.join("executed_trail.gpx"));

    let planned = read_gpx(&report.planned.path);
    assert_eq!(planned.creator.as_deref(), Some("GeoWiz"));
    assert_eq!(planned.tracks.len(), 1);
    assert_eq!(
        planned.tracks[0].name.as_deref(),
        Some("GeoWiz-Synthetic - Planned")
    );
    let points = &planned.tracks[0].segments[0].points;
    assert_eq!(points.len(), n);
    let first = points[0].point();
    assert!((first.y() - 55.611218).abs() < 1e-9);
    assert!((first.x() + 1.702551).abs() < 1e-9);
    let expected_ele = ((55.6112176200343 - 54.0) * 100.0 * 10.0_f64).round() / 10.0;
    assert_eq!(points[0].elevation, Some(expected_ele));

    let executed = read_gpx(&report.executed.path);
    assert_eq!(
        executed.tracks[0].name.as_deref(),
        Some("GeoWiz-Synthetic - Executed")
    );
    let executed_points = &executed.tracks[0].segments[0].points;
    assert_eq!(executed_points.len(), n);
    assert_eq!(executed_points[0].point(), points[0].point());
    assert_eq!(executed_points[n - 1].point(), points[n - 1].point());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn same_seed_writes_identical_files() {
    let dir_a = scratch_dir("seed-a");
    let dir_b = scratch_dir("seed-b");
    let source = SlopeTerrain { calls: Cell::new(0) };

    let a = run_pipeline(&options(&dir_a), &source, &mut StdRng::seed_from_u64(3)).unwrap();
    let b = run_pipeline(&options(&dir_b), &source, &mut StdRng::seed_from_u64(3)).unwrap();

    assert_eq!(
        fs::read_to_string(&a.executed.path).unwrap(),
        fs::read_to_string(&b.executed.path).unwrap()
    );

    fs::remove_dir_all(&dir_a).unwrap();
    fs::remove_dir_all(&dir_b).unwrap();
}

#[test]
fn elevation_failure_writes_nothing() {
    let dir = scratch_dir("offline");
    let mut rng = StdRng::seed_from_u64(1);

    let err = run_pipeline(&options(&dir), &Offline, &mut rng).unwrap_err();
    assert!(format!("{:#}", err).contains("connection refused"));
    assert!(!dir.join("planned_trail.gpx").exists());
}

#[test]
fn invalid_interval_is_reported() {
    let dir = scratch_dir("interval");
    let mut options = options(&dir);
    options.interval_m = 0.0;
    let source = SlopeTerrain { calls: Cell::new(0) };

    let err = run_pipeline(&options, &source, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TrailError>(),
        Some(TrailError::InvalidInterval(_))
    ));
    assert_eq!(source.calls.get(), 0);
}
