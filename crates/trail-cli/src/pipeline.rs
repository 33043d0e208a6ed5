//! Planned/executed trail generation pipeline.
//!
//! Plan the route, attach elevations, write the planned file; then perturb
//! the planned route, attach fresh elevations, write the executed file.

use crate::gpx::{write_trail, TrailMetadata};
use anyhow::{Context, Result};
use rand::Rng;
use std::path::PathBuf;
use trail_core::{
    attach_elevations, plan_route, simulate_execution, DeviationParams, ElevationSource, GeoPoint,
    Trail, DEFAULT_BATCH_SIZE, DEFAULT_INTERVAL_M,
};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub interval_m: f64,
    pub deviation: DeviationParams,
    pub batch_size: usize,
    pub output_dir: PathBuf,
    pub planned_filename: String,
    pub executed_filename: String,
    pub metadata: TrailMetadata,
}

impl PipelineOptions {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start,
            end,
            interval_m: DEFAULT_INTERVAL_M,
            deviation: DeviationParams::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            output_dir: PathBuf::from("output"),
            planned_filename: "planned_trail.gpx".to_string(),
            executed_filename: "executed_trail.gpx".to_string(),
            metadata: TrailMetadata::default(),
        }
    }
}

/// A trail that has been written to disk.
#[derive(Debug, Clone)]
pub struct WrittenTrail {
    pub path: PathBuf,
    pub trail: Trail,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub planned: WrittenTrail,
    pub executed: WrittenTrail,
}

pub fn run_pipeline<S, R>(options: &PipelineOptions, source: &S, rng: &mut R) -> Result<PipelineReport>
where
    S: ElevationSource + ?Sized,
    R: Rng + ?Sized,
{
    let route = plan_route(options.start, options.end, options.interval_m)
        .context("failed to plan route")?;
    tracing::info!(
        "Planned {} points over {:.0} m",
        route.len(),
        route.total_distance_m()
    );

    let planned = attach_elevations(source, route, options.batch_size)
        .context("failed to resolve elevations for planned trail")?;
    let planned_path = options.output_dir.join(&options.planned_filename);
    write_trail(&planned, &options.metadata.with_suffix("Planned"), &planned_path)?;
    tracing::info!("Wrote planned trail to {}", planned_path.display());

    let executed_route = simulate_execution(planned.route(), options.deviation, rng)
        .context("failed to simulate executed trail")?;
    let executed = attach_elevations(source, executed_route, options.batch_size)
        .context("failed to resolve elevations for executed trail")?;
    let executed_path = options.output_dir.join(&options.executed_filename);
    write_trail(&executed, &options.metadata.with_suffix("Executed"), &executed_path)?;
    tracing::info!("Wrote executed trail to {}", executed_path.display());

    Ok(PipelineReport {
        planned: WrittenTrail {
            path: planned_path,
            trail: planned,
        },
        executed: WrittenTrail {
            path: executed_path,
            trail: executed,
        },
    })
}
