//! CLI tool to generate planned and executed GPX trails.
//!
//! Plans a great-circle walk between two coordinates, then simulates an
//! executed walk that deviates sideways from the plan.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use trail_cli::{run_pipeline, PipelineOptions, TrailMetadata};
use trail_core::{DeviationParams, GeoPoint};
use trail_elevation::{ElevationConfig, OpenMeteoClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate planned and executed GPX trails
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Starting latitude
    #[arg(long, allow_negative_numbers = true)]
    start_lat: f64,

    /// Starting longitude
    #[arg(long, allow_negative_numbers = true)]
    start_lon: f64,

    /// Ending latitude
    #[arg(long, allow_negative_numbers = true)]
    end_lat: f64,

    /// Ending longitude
    #[arg(long, allow_negative_numbers = true)]
    end_lon: f64,

    /// Interval between points in meters
    #[arg(long, default_value_t = 100.0)]
    interval: f64,

    /// Mean deviation for the simulated walk in meters
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    mean: f64,

    /// Standard deviation for the simulated walk in meters
    #[arg(long, default_value_t = 100.0)]
    stddev: f64,

    /// Filename for the planned trail
    #[arg(long, default_value = "planned_trail.gpx")]
    planned_filename: String,

    /// Filename for the executed trail
    #[arg(long, default_value = "executed_trail.gpx")]
    executed_filename: String,

    /// Directory the trails are written into (created if missing)
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Creator of the GPX file
    #[arg(long, default_value = "GeoWiz")]
    creator: String,

    /// Name of the route
    #[arg(long, default_value = "GeoWiz-Synthetic")]
    name: String,

    /// Link for the author
    #[arg(long, default_value = "https://github.com/dsikar")]
    author_link: String,

    /// Text for the author link
    #[arg(long, default_value = "DanielSikar")]
    author_text: String,

    /// MIME type of the author link
    #[arg(long, default_value = "text/html")]
    author_type: String,

    /// Timestamp stamped on every track point (RFC 3339)
    #[arg(long)]
    timestamp: Option<DateTime<Utc>>,

    /// Seed for the deviation RNG (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing() -> Result<()> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["generate_trails=info", "trail_cli=info", "trail_core=info", "trail_elevation=info"] {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let start = GeoPoint::new(args.start_lat, args.start_lon).context("invalid start coordinate")?;
    let end = GeoPoint::new(args.end_lat, args.end_lon).context("invalid end coordinate")?;

    let elevation_config = ElevationConfig::from_env();
    tracing::info!("Using elevation service at {}", elevation_config.base_url);
    let batch_size = elevation_config.batch_size;
    let client = OpenMeteoClient::new(elevation_config)?;

    let defaults = TrailMetadata::default();
    let options = PipelineOptions {
        interval_m: args.interval,
        deviation: DeviationParams {
            mean_m: args.mean,
            stddev_m: args.stddev,
        },
        batch_size,
        output_dir: args.output_dir,
        planned_filename: args.planned_filename,
        executed_filename: args.executed_filename,
        metadata: TrailMetadata {
            creator: args.creator,
            name: args.name,
            author_link: args.author_link,
            author_text: args.author_text,
            author_type: args.author_type,
            timestamp: args.timestamp.unwrap_or(defaults.timestamp),
        },
        ..PipelineOptions::new(start, end)
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let report = run_pipeline(&options, &client, &mut rng)?;
    for written in [&report.planned, &report.executed] {
        let filename = written
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| written.path.display().to_string());
        println!(
            "GPX file '{}' has been generated with {} points.",
            filename,
            written.trail.len()
        );
    }
    println!("GPX files generated successfully.");
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("Failed to initialise logging: {:#}", err);
    }

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("An error occurred: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
