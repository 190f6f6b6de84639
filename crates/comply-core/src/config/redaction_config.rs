//! Redaction configuration.

use serde::{Deserialize, Serialize};

use crate::models::MaskingMode;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RedactionConfig {
    /// `label` writes `[LABEL]`, `star` writes one `*` per character. Default: label.
    pub masking_mode: Option<MaskingMode>,
}

impl RedactionConfig {
    pub fn effective_masking_mode(&self) -> MaskingMode {
        self.masking_mode.unwrap_or_default()
    }

    pub(crate) fn merge_from(&mut self, other: &RedactionConfig) {
        if other.masking_mode.is_some() {
            self.masking_mode = other.masking_mode;
        }
    }
}
