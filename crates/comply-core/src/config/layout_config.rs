//! Layout segmentation configuration.

use serde::{Deserialize, Serialize};

use super::{check_non_negative, check_unit_interval, merge_fields};
use crate::errors::ConfigError;

/// Thresholds and penalties for page segmentation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutConfig {
    /// Upward move (in page units) counted as a reading-order jump. Default: 15.0.
    pub jump_threshold: Option<f64>,
    /// Jump ratio above which a page is treated as chaotic. Default: 0.10.
    pub chaos_ratio: Option<f64>,
    /// Minimum share of words in each half for a sidebar layout. Default: 0.15.
    pub column_share: Option<f64>,
    /// Max vertical distance from a line's anchor word. Default: 4.0.
    pub line_tolerance: Option<f64>,
    /// Narrowest gap accepted as a column gutter. Default: 10.0.
    pub min_gutter_width: Option<f64>,
    /// Fraction of page width excluded at each edge when searching for a gutter. Default: 0.10.
    pub gutter_band: Option<f64>,
    /// Ideal gutter width as a fraction of page width. Default: 0.10.
    pub ideal_gutter_ratio: Option<f64>,
    /// Upper bound on the jump-ratio penalty. Default: 0.3.
    pub jump_penalty_cap: Option<f64>,
    /// Flat penalty for chaotic pages. Default: 0.25.
    pub chaotic_penalty: Option<f64>,
    /// Maximum penalty for a sidebar gutter of zero width. Default: 0.1.
    pub sidebar_penalty_weight: Option<f64>,
    /// Lowest confidence a page can receive. Default: 0.1.
    pub confidence_floor: Option<f64>,
    /// Rewrite all-caps words to title case during normalization. Default: true.
    pub titlecase_shouting: Option<bool>,
}

impl LayoutConfig {
    pub fn effective_jump_threshold(&self) -> f64 {
        self.jump_threshold.unwrap_or(15.0)
    }

    pub fn effective_chaos_ratio(&self) -> f64 {
        self.chaos_ratio.unwrap_or(0.10)
    }

    pub fn effective_column_share(&self) -> f64 {
        self.column_share.unwrap_or(0.15)
    }

    pub fn effective_line_tolerance(&self) -> f64 {
        self.line_tolerance.unwrap_or(4.0)
    }

    pub fn effective_min_gutter_width(&self) -> f64 {
        self.min_gutter_width.unwrap_or(10.0)
    }

    pub fn effective_gutter_band(&self) -> f64 {
        self.gutter_band.unwrap_or(0.10)
    }

    pub fn effective_ideal_gutter_ratio(&self) -> f64 {
        self.ideal_gutter_ratio.unwrap_or(0.10)
    }

    pub fn effective_jump_penalty_cap(&self) -> f64 {
        self.jump_penalty_cap.unwrap_or(0.3)
    }

    pub fn effective_chaotic_penalty(&self) -> f64 {
        self.chaotic_penalty.unwrap_or(0.25)
    }

    pub fn effective_sidebar_penalty_weight(&self) -> f64 {
        self.sidebar_penalty_weight.unwrap_or(0.1)
    }

    pub fn effective_confidence_floor(&self) -> f64 {
        self.confidence_floor.unwrap_or(0.1)
    }

    pub fn effective_titlecase_shouting(&self) -> bool {
        self.titlecase_shouting.unwrap_or(true)
    }

    pub(crate) fn merge_from(&mut self, other: &LayoutConfig) {
        merge_fields!(self, other;
            opt: [
                jump_threshold, chaos_ratio, column_share, line_tolerance,
                min_gutter_width, gutter_band, ideal_gutter_ratio, jump_penalty_cap,
                chaotic_penalty, sidebar_penalty_weight, confidence_floor, titlecase_shouting,
            ];
            coll: []);
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("layout.jump_threshold", self.jump_threshold)?;
        check_non_negative("layout.line_tolerance", self.line_tolerance)?;
        check_non_negative("layout.min_gutter_width", self.min_gutter_width)?;
        check_unit_interval("layout.chaos_ratio", self.chaos_ratio)?;
        check_unit_interval("layout.column_share", self.column_share)?;
        check_unit_interval("layout.ideal_gutter_ratio", self.ideal_gutter_ratio)?;
        check_unit_interval("layout.jump_penalty_cap", self.jump_penalty_cap)?;
        check_unit_interval("layout.chaotic_penalty", self.chaotic_penalty)?;
        check_unit_interval("layout.sidebar_penalty_weight", self.sidebar_penalty_weight)?;
        check_unit_interval("layout.confidence_floor", self.confidence_floor)?;
        if let Some(band) = self.gutter_band {
            if !(0.0..0.5).contains(&band) {
                return Err(ConfigError::ValidationFailed {
                    field: "layout.gutter_band".to_string(),
                    message: "must be in [0.0, 0.5)".to_string(),
                });
            }
        }
        Ok(())
    }
}
