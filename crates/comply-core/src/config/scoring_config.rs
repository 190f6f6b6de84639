//! Trust scoring configuration.

use serde::{Deserialize, Serialize};

use super::check_unit_interval;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Trust score a document must exceed to PASS. No default: it has to be
    /// chosen per deployment.
    pub pass_threshold: Option<f64>,
}

impl ScoringConfig {
    /// The configured pass threshold, or `MissingValue` when unset.
    pub fn require_pass_threshold(&self) -> Result<f64, ConfigError> {
        self.pass_threshold.ok_or_else(|| ConfigError::MissingValue {
            field: "scoring.pass_threshold".to_string(),
        })
    }

    pub(crate) fn merge_from(&mut self, other: &ScoringConfig) {
        if other.pass_threshold.is_some() {
            self.pass_threshold = other.pass_threshold;
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("scoring.pass_threshold", self.pass_threshold)
    }
}
