//! Morphological sensor for gendered person terms left in the text.

use std::sync::Arc;

use comply_core::config::NeutralizerConfig;
use comply_core::errors::NeutralizerError;
use comply_core::models::ComplianceFlag;
use comply_core::traits::{MorphAnalyzer, MorphToken, PartOfSpeech};

use crate::edits::EditMap;

/// Flags gendered nouns, proper nouns, and pronouns that look person-related.
pub struct GenderSensor {
    analyzer: Arc<dyn MorphAnalyzer>,
    person_suffixes: Vec<String>,
    person_entity_types: Vec<String>,
    excluded_entity_types: Vec<String>,
    false_positive_terms: Vec<String>,
    confidence: f64,
}

impl GenderSensor {
    pub fn new(analyzer: Arc<dyn MorphAnalyzer>, config: &NeutralizerConfig) -> Self {
        Self {
            analyzer,
            person_suffixes: lowercase(config.effective_person_suffixes()),
            person_entity_types: config.effective_person_entity_types(),
            excluded_entity_types: config.effective_excluded_entity_types(),
            false_positive_terms: lowercase(config.effective_false_positive_terms()),
            confidence: config.effective_flag_confidence(),
        }
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Heuristic person test: suffix or person entity type, minus the
    /// blacklist and excluded entity types.
    fn is_person_related(&self, token: &MorphToken) -> bool {
        let lower = token.text.to_lowercase();
        if self.false_positive_terms.iter().any(|t| *t == lower) {
            return false;
        }
        let entity = token.entity_type.as_deref();
        if entity.is_some_and(|e| self.excluded_entity_types.iter().any(|x| x == e)) {
            return false;
        }
        self.person_suffixes.iter().any(|s| lower.ends_with(s.as_str()))
            || entity.is_some_and(|e| self.person_entity_types.iter().any(|p| p == e))
    }

    fn should_flag(&self, token: &MorphToken) -> bool {
        let candidate = match token.pos {
            PartOfSpeech::Pronoun => true,
            PartOfSpeech::Noun | PartOfSpeech::ProperNoun => self.is_person_related(token),
            PartOfSpeech::Other => false,
        };
        candidate && token.gender.is_some()
    }

    /// Flags for `text`, skipping tokens inside rewritten spans.
    pub fn scan(&self, text: &str, edits: &EditMap) -> Result<Vec<ComplianceFlag>, NeutralizerError> {
        let tokens = self.analyzer.analyze(text)?;
        let flags = tokens
            .iter()
            .filter(|t| self.should_flag(t) && !edits.touches(t.start, t.end))
            .map(|t| ComplianceFlag {
                term: t.text.clone(),
                start: t.start,
                end: t.end,
                confidence: self.confidence,
            })
            .collect();
        Ok(flags)
    }
}

fn lowercase(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.to_lowercase()).collect()
}
