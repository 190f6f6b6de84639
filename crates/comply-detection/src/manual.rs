//! Operator-configured phrase overrides.

use comply_core::config::DetectionConfig;
use comply_core::models::{Hit, HitSource};

/// Literal, case-sensitive phrase → label overrides.
#[derive(Debug, Clone, Default)]
pub struct ManualOverrides {
    entries: Vec<(String, String)>,
}

impl ManualOverrides {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|(phrase, _)| !phrase.is_empty())
            .collect();
        Self { entries }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(
            config
                .manual_overrides
                .iter()
                .map(|(p, l)| (p.clone(), l.clone()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every non-overlapping occurrence of each phrase, as `Manual` hits
    /// with confidence 1.0.
    pub fn scan(&self, text: &str) -> Vec<Hit> {
        let mut hits = Vec::new();
        for (phrase, label) in &self.entries {
            for (start, matched) in text.match_indices(phrase.as_str()) {
                hits.push(Hit::new(
                    start,
                    start + matched.len(),
                    label.clone(),
                    HitSource::Manual,
                    1.0,
                ));
            }
        }
        hits
    }
}
