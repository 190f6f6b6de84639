//! Tier-3 neutralizer configuration.

use serde::{Deserialize, Serialize};

use super::{check_unit_interval, merge_fields};
use crate::constants;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NeutralizerConfig {
    /// Confidence of dictionary rewrites. Default: 0.9.
    pub dictionary_confidence: Option<f64>,
    /// Confidence of compliance flags. Default: 0.75.
    pub flag_confidence: Option<f64>,
    /// Run the morphological sensor. Default: true.
    pub sensor_enabled: Option<bool>,
    /// Lowercase suffixes marking person-related nouns.
    #[serde(default)]
    pub person_suffixes: Vec<String>,
    /// Entity types that mark a token as a person.
    #[serde(default)]
    pub person_entity_types: Vec<String>,
    /// Entity types never flagged (dates, times, numbers).
    #[serde(default)]
    pub excluded_entity_types: Vec<String>,
    /// Lowercase tokens never flagged.
    #[serde(default)]
    pub false_positive_terms: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl NeutralizerConfig {
    pub fn effective_dictionary_confidence(&self) -> f64 {
        self.dictionary_confidence.unwrap_or(0.9)
    }

    pub fn effective_flag_confidence(&self) -> f64 {
        self.flag_confidence.unwrap_or(0.75)
    }

    pub fn effective_sensor_enabled(&self) -> bool {
        self.sensor_enabled.unwrap_or(true)
    }

    pub fn effective_person_suffixes(&self) -> Vec<String> {
        if self.person_suffixes.is_empty() {
            owned(constants::PERSON_SUFFIXES)
        } else {
            self.person_suffixes.clone()
        }
    }

    pub fn effective_person_entity_types(&self) -> Vec<String> {
        if self.person_entity_types.is_empty() {
            owned(constants::PERSON_ENTITY_TYPES)
        } else {
            self.person_entity_types.clone()
        }
    }

    pub fn effective_excluded_entity_types(&self) -> Vec<String> {
        if self.excluded_entity_types.is_empty() {
            owned(constants::EXCLUDED_ENTITY_TYPES)
        } else {
            self.excluded_entity_types.clone()
        }
    }

    pub fn effective_false_positive_terms(&self) -> Vec<String> {
        if self.false_positive_terms.is_empty() {
            owned(constants::FALSE_POSITIVE_TERMS)
        } else {
            self.false_positive_terms.clone()
        }
    }

    pub(crate) fn merge_from(&mut self, other: &NeutralizerConfig) {
        merge_fields!(self, other;
            opt: [dictionary_confidence, flag_confidence, sensor_enabled];
            coll: [person_suffixes, person_entity_types, excluded_entity_types, false_positive_terms]);
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("neutralizer.dictionary_confidence", self.dictionary_confidence)?;
        check_unit_interval("neutralizer.flag_confidence", self.flag_confidence)?;
        Ok(())
    }
}
