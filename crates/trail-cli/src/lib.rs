//! Trail CLI - planned and executed GPX trail generation
//!
//! This crate provides the `generate_trails` binary along with the GPX writer
//! and the pipeline it drives.

pub mod gpx;
pub mod pipeline;

pub use gpx::{render_gpx, write_trail, GpxError, TrailMetadata};
pub use pipeline::{run_pipeline, PipelineOptions, PipelineReport, WrittenTrail};
