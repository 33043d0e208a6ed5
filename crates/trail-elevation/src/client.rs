//! Open-Meteo elevation HTTP client.

use crate::config::ElevationConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use trail_core::{format_coordinate, ElevationSource, GeoPoint, TrailError};

#[derive(Debug, Error)]
pub enum ElevationError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("elevation request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("elevation provider HTTP {status}{}", reason_suffix(.reason))]
    Status { status: u16, reason: Option<String> },

    #[error("malformed elevation response: {0}")]
    Malformed(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|reason| format!(": {}", reason))
        .unwrap_or_default()
}

impl From<ElevationError> for TrailError {
    fn from(err: ElevationError) -> Self {
        TrailError::ElevationService(Box::new(err))
    }
}

#[derive(Debug, Deserialize)]
struct OpenMeteoElevationResponse {
    elevation: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoErrorResponse {
    reason: Option<String>,
}

/// Blocking client for `GET /v1/elevation`.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    config: ElevationConfig,
    client: reqwest::blocking::Client,
}

impl OpenMeteoClient {
    pub fn new(config: ElevationConfig) -> Result<Self, ElevationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ElevationError::Client)?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ElevationConfig {
        &self.config
    }

    /// Fetch elevations for one batch of points.
    pub fn fetch(&self, points: &[GeoPoint]) -> Result<Vec<f64>, ElevationError> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let url = build_request_url(&self.config.base_url, points);
        tracing::debug!("Requesting {} elevations from {}", points.len(), self.config.base_url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(ElevationError::Transport)?;

        let status = response.status();
        let body = response.text().map_err(ElevationError::Transport)?;
        if !status.is_success() {
            let reason = serde_json::from_str::<OpenMeteoErrorResponse>(&body)
                .ok()
                .and_then(|payload| payload.reason);
            return Err(ElevationError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        parse_elevations(&body)
    }
}

impl ElevationSource for OpenMeteoClient {
    fn lookup(&self, points: &[GeoPoint]) -> trail_core::Result<Vec<f64>> {
        Ok(self.fetch(points)?)
    }
}

/// Decode an Open-Meteo `{"elevation": [...]}` body.
pub fn parse_elevations(body: &str) -> Result<Vec<f64>, ElevationError> {
    let payload: OpenMeteoElevationResponse =
        serde_json::from_str(body).map_err(|err| ElevationError::Malformed(err.to_string()))?;
    let elevations = payload
        .elevation
        .ok_or_else(|| ElevationError::Malformed("missing elevation".to_string()))?;

    if let Some(bad) = elevations.iter().position(|value| !value.is_finite()) {
        return Err(ElevationError::Malformed(format!(
            "non-finite elevation at index {}",
            bad
        )));
    }

    Ok(elevations)
}

/// Comma-join one coordinate axis, two decimals per value.
fn join_params(values: impl Iterator<Item = f64>) -> String {
    values.map(format_coordinate).collect::<Vec<_>>().join(",")
}

pub fn build_request_url(base: &str, points: &[GeoPoint]) -> String {
    let latitudes = join_params(points.iter().map(|p| p.lat));
    let longitudes = join_params(points.iter().map(|p| p.lon));
    let separator = if base.contains('?') { "&" } else { "?" };
    format!(
        "{}{}latitude={}&longitude={}",
        base, separator, latitudes, longitudes
    )
}
