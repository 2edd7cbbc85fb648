// src/simulation/config.rs

use crate::error::ConfigError;
use crate::strategy::classification::{AbcThresholds, DEFAULT_A_THRESHOLD, DEFAULT_B_THRESHOLD};
use crate::strategy::implementations::ForecastMode;
use crate::strategy::optimization::FALLBACK_Z_SCORE;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub horizon_days: usize,
    pub review_period_days: u32,
    pub days_per_year: u32,
    pub fallback_z_score: f64,
    pub abc_a_threshold: f64,
    pub abc_b_threshold: f64,
    pub forecast: ForecastMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_days: 120,
            review_period_days: 30,
            days_per_year: 365,
            fallback_z_score: FALLBACK_Z_SCORE,
            abc_a_threshold: DEFAULT_A_THRESHOLD,
            abc_b_threshold: DEFAULT_B_THRESHOLD,
            forecast: ForecastMode::Flat,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn abc_thresholds(&self) -> AbcThresholds {
        AbcThresholds {
            a: self.abc_a_threshold,
            b: self.abc_b_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{"horizon_days": 60}"#).unwrap();
        assert_eq!(config.horizon_days, 60);
        assert_eq!(config.review_period_days, 30);
        assert_eq!(config.fallback_z_score, 2.05);
        assert_eq!(config.forecast, ForecastMode::Flat);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = EngineConfig::from_json_str("{ horizon_days: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"forecast": {{"mode": "jittered", "seed": 9, "jitter": 0.1}}}}"#
        )
        .unwrap();

        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.forecast, ForecastMode::Jittered { seed: 9, jitter: 0.1 });
        assert_eq!(config.horizon_days, 120);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = EngineConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
