//! Batch pipeline configuration.

use serde::{Deserialize, Serialize};

use super::merge_fields;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker threads for batch processing. Default: available parallelism.
    pub workers: Option<usize>,
    /// Recognizer instances in the pool. Default: 1.
    pub recognizer_instances: Option<usize>,
    /// Lowercase file extensions accepted as documents. Default: ["pdf"].
    #[serde(default)]
    pub accepted_extensions: Vec<String>,
}

impl PipelineConfig {
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    pub fn effective_recognizer_instances(&self) -> usize {
        self.recognizer_instances.unwrap_or(1)
    }

    pub fn effective_accepted_extensions(&self) -> Vec<String> {
        if self.accepted_extensions.is_empty() {
            vec!["pdf".to_string()]
        } else {
            self.accepted_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        }
    }

    pub(crate) fn merge_from(&mut self, other: &PipelineConfig) {
        merge_fields!(self, other;
            opt: [workers, recognizer_instances];
            coll: [accepted_extensions]);
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.workers".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.recognizer_instances == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.recognizer_instances".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
