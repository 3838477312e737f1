//! Simulator configuration
//!
//! Read from an optional JSON file; any field left out takes its default.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Default location of the question library
pub const DEFAULT_QUESTIONS_PATH: &str = "data/QuestionsLibrary.json";

/// Default location of the underwriting model registry
pub const DEFAULT_MODELS_PATH: &str = "data/UnderwritingModel.json";

fn default_questions_path() -> PathBuf { PathBuf::from(DEFAULT_QUESTIONS_PATH) }
fn default_models_path() -> PathBuf { PathBuf::from(DEFAULT_MODELS_PATH) }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Question library JSON file
    #[serde(default = "default_questions_path")]
    pub questions_path: PathBuf,

    /// Underwriting model registry JSON file
    #[serde(default = "default_models_path")]
    pub models_path: PathBuf,

    /// Model selected when the simulator opens (unscoped when absent or unknown)
    #[serde(default)]
    pub bootstrap_model_id: Option<i64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            questions_path: default_questions_path(),
            models_path: default_models_path(),
            bootstrap_model_id: None,
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| CatalogError::io(path, err))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
