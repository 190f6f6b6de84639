//! Neutral-term dictionary: validation, ordering, and application.

use std::collections::HashSet;

use regex::Regex;

use comply_core::errors::NeutralizerError;
use comply_core::models::{NeutralTerm, NeutralizationEvent, RuleKind};

use crate::edits::EditMap;
use crate::rules::{self, Replacement};

fn whole_word(original: &str) -> Result<Regex, NeutralizerError> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(original))).map_err(|e| {
        NeutralizerError::InvalidTerm {
            original: original.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Check a term table before use.
///
/// Rejects empty entries, duplicate originals (case-insensitive), neutral
/// terms that contain any original as a whole word, and neutral terms a
/// pattern rule would rewrite. A table that passes can be applied to its own
/// output without further substitutions.
pub fn validate_terms(terms: &[NeutralTerm]) -> Result<(), NeutralizerError> {
    let invalid = |original: &str, reason: &str| NeutralizerError::InvalidTerm {
        original: original.to_string(),
        reason: reason.to_string(),
    };

    let mut seen = HashSet::new();
    let mut compiled = Vec::with_capacity(terms.len());
    for term in terms {
        if term.original.trim().is_empty() {
            return Err(invalid(&term.original, "original term is empty"));
        }
        if term.neutral.trim().is_empty() {
            return Err(invalid(&term.original, "neutral term is empty"));
        }
        if !seen.insert(term.original.to_lowercase()) {
            return Err(invalid(&term.original, "duplicate original term"));
        }
        compiled.push((term.original.as_str(), whole_word(&term.original)?));
    }

    for term in terms {
        if let Some((original, _)) = compiled.iter().find(|(_, re)| re.is_match(&term.neutral)) {
            return Err(invalid(
                &term.original,
                &format!("neutral term {:?} contains original term {original:?}", term.neutral),
            ));
        }
        if rules::any_pattern_matches(&term.neutral) {
            return Err(invalid(&term.original, "neutral term would be rewritten by a title pattern"));
        }
    }
    Ok(())
}

struct Entry {
    term: NeutralTerm,
    regex: Regex,
}

/// Validated dictionary, ordered longest original first.
pub struct Dictionary {
    entries: Vec<Entry>,
}

impl Dictionary {
    pub fn new(mut terms: Vec<NeutralTerm>) -> Result<Self, NeutralizerError> {
        validate_terms(&terms)?;
        terms.sort_by(|a, b| {
            b.original
                .chars()
                .count()
                .cmp(&a.original.chars().count())
                .then_with(|| a.original.cmp(&b.original))
        });
        let entries = terms
            .into_iter()
            .map(|term| {
                let regex = whole_word(&term.original)?;
                Ok(Entry { term, regex })
            })
            .collect::<Result<Vec<_>, NeutralizerError>>()?;
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Originals in application order.
    pub fn originals(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.term.original.as_str())
    }

    /// Substitute every whole-word, case-insensitive occurrence of each
    /// original, one entry at a time.
    pub fn apply(
        &self,
        text: String,
        confidence: f64,
        events: &mut Vec<NeutralizationEvent>,
        edits: &mut EditMap,
    ) -> String {
        let mut current = text;
        for entry in &self.entries {
            if let Some(next) = rules::rewrite_all(
                &current,
                &entry.regex,
                Replacement::Literal(&entry.term.neutral),
                RuleKind::Dictionary,
                confidence,
                events,
                edits,
            ) {
                current = next;
            }
        }
        current
    }
}
