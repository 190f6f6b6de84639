//! Top-level Comply configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    DetectionConfig, LayoutConfig, LedgerConfig, NeutralizerConfig, PipelineConfig,
    RedactionConfig, ScoringConfig,
};
use crate::errors::ConfigError;
use crate::models::MaskingMode;

/// Project config file name, looked up in the root passed to [`ComplyConfig::load`].
pub const CONFIG_FILE_NAME: &str = "comply.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`COMPLY_*`)
/// 3. Project config (`comply.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ComplyConfig {
    pub layout: LayoutConfig,
    pub detection: DetectionConfig,
    pub redaction: RedactionConfig,
    pub neutralizer: NeutralizerConfig,
    pub scoring: ScoringConfig,
    pub ledger: LedgerConfig,
    pub pipeline: PipelineConfig,
}

/// Caller-supplied overrides that win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub pass_threshold: Option<f64>,
    pub db_path: Option<String>,
    pub workers: Option<usize>,
    pub masking_mode: Option<MaskingMode>,
    pub recognizer_enabled: Option<bool>,
}

impl ComplyConfig {
    /// Load configuration from `root/comply.toml`, the environment, and
    /// `overrides`, then validate.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ComplyConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values. A missing pass threshold is not a
    /// validation failure here; it is reported when a pipeline is built.
    pub fn validate(config: &ComplyConfig) -> Result<(), ConfigError> {
        config.layout.validate()?;
        config.detection.validate()?;
        config.neutralizer.validate()?;
        config.scoring.validate()?;
        config.ledger.validate()?;
        config.pipeline.validate()?;
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut ComplyConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ComplyConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.merge(&file_config);
        Ok(())
    }

    /// Merge `other` into `self`; only set values in `other` win.
    pub fn merge(&mut self, other: &ComplyConfig) {
        self.layout.merge_from(&other.layout);
        self.detection.merge_from(&other.detection);
        self.redaction.merge_from(&other.redaction);
        self.neutralizer.merge_from(&other.neutralizer);
        self.scoring.merge_from(&other.scoring);
        self.ledger.merge_from(&other.ledger);
        self.pipeline.merge_from(&other.pipeline);
    }

    /// Apply environment variable overrides.
    /// Pattern: `COMPLY_SCORING_PASS_THRESHOLD`, `COMPLY_LEDGER_DB_PATH`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut ComplyConfig) {
        if let Ok(val) = std::env::var("COMPLY_SCORING_PASS_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.scoring.pass_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("COMPLY_LEDGER_DB_PATH") {
            config.ledger.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("COMPLY_PIPELINE_WORKERS") {
            if let Ok(v) = val.parse::<usize>() {
                config.pipeline.workers = Some(v);
            }
        }
        if let Ok(val) = std::env::var("COMPLY_REDACTION_MASKING_MODE") {
            match val.to_ascii_lowercase().as_str() {
                "label" => config.redaction.masking_mode = Some(MaskingMode::Label),
                "star" => config.redaction.masking_mode = Some(MaskingMode::Star),
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("COMPLY_DETECTION_RECOGNIZER_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.detection.recognizer_enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("COMPLY_LAYOUT_TITLECASE_SHOUTING") {
            if let Ok(v) = val.parse::<bool>() {
                config.layout.titlecase_shouting = Some(v);
            }
        }
    }

    /// Apply programmatic overrides (highest priority).
    fn apply_overrides(config: &mut ComplyConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.pass_threshold {
            config.scoring.pass_threshold = Some(v);
        }
        if let Some(ref v) = overrides.db_path {
            config.ledger.db_path = Some(v.clone());
        }
        if let Some(v) = overrides.workers {
            config.pipeline.workers = Some(v);
        }
        if let Some(v) = overrides.masking_mode {
            config.redaction.masking_mode = Some(v);
        }
        if let Some(v) = overrides.recognizer_enabled {
            config.detection.recognizer_enabled = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
