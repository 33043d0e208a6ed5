//! Elevation service configuration from environment.

use std::env;
use trail_core::DEFAULT_BATCH_SIZE;

pub const DEFAULT_ELEVATION_URL: &str = "https://api.open-meteo.com/v1/elevation";

#[derive(Debug, Clone)]
pub struct ElevationConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Coordinates per request; Open-Meteo accepts at most 100.
    pub batch_size: usize,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ELEVATION_URL.to_string(),
            timeout_secs: 10,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ElevationConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("ELEVATION_API_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.base_url),
            timeout_secs: env::var("ELEVATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            batch_size: env::var("ELEVATION_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|size: &usize| *size > 0)
                .unwrap_or(defaults.batch_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_open_meteo() {
        let config = ElevationConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1/elevation");
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.timeout_secs, 10);
    }
}
