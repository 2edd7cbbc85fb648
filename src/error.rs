// src/error.rs

use thiserror::Error;

/// Failures while turning a CSV export into `SalesRecord`s.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected columns: expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },
}

/// Failures while writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while loading an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while generating synthetic history.
#[derive(Debug, Error)]
pub enum DemandError {
    #[error("Invalid demand distribution (mean {mean}, std dev {std_dev}): {reason}")]
    InvalidDistribution {
        mean: f64,
        std_dev: f64,
        reason: String,
    },
}
