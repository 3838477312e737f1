//! Error types for loading data and driving the simulator

use thiserror::Error;

/// Errors raised while reading or writing the question library and model registry
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV input: {0}")]
    Csv(#[from] csv::Error),
}

impl CatalogError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Errors raised by simulator operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    #[error("no underwriting model with Id {0}")]
    UnknownModel(i64),

    #[error("no question with Id {0}")]
    UnknownQuestion(i64),
}
