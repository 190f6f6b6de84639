//! Tier-3 neutralizer.

use std::sync::Arc;

use comply_core::config::NeutralizerConfig;
use comply_core::errors::NeutralizerError;
use comply_core::models::{NeutralTerm, Tier3Event};
use comply_core::traits::MorphAnalyzer;

use crate::dictionary::Dictionary;
use crate::edits::EditMap;
use crate::rules::{self, Replacement};
use crate::sensor::GenderSensor;

/// Result of neutralizing one document.
#[derive(Debug, Clone, PartialEq)]
pub struct NeutralizationOutcome {
    pub text: String,
    /// Rewrites in application order, then flags in text order. A single
    /// `NoAction` when nothing fired.
    pub events: Vec<Tier3Event>,
}

impl NeutralizationOutcome {
    pub fn rewrite_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Tier3Event::Neutralized(_)))
            .count()
    }

    pub fn flag_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Tier3Event::Flagged(_)))
            .count()
    }

    /// Lowest event confidence, or 1.0 when no event carries one.
    pub fn confidence_floor(&self) -> f64 {
        self.events
            .iter()
            .filter_map(Tier3Event::confidence)
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |a| a.min(c))))
            .unwrap_or(1.0)
    }
}

/// Pattern rules, dictionary, and optional sensor for one worker. Immutable
/// after construction and shared across documents.
pub struct Neutralizer {
    dictionary: Dictionary,
    dictionary_confidence: f64,
    sensor: Option<GenderSensor>,
}

impl Neutralizer {
    /// Build from config and a term table. The table is validated; the
    /// sensor runs only when an analyzer is given and the config enables it.
    pub fn new(
        config: &NeutralizerConfig,
        terms: Vec<NeutralTerm>,
        analyzer: Option<Arc<dyn MorphAnalyzer>>,
    ) -> Result<Self, NeutralizerError> {
        let dictionary = Dictionary::new(terms)?;
        let sensor = analyzer
            .filter(|_| config.effective_sensor_enabled())
            .map(|a| GenderSensor::new(a, config));
        Ok(Self {
            dictionary,
            dictionary_confidence: config.effective_dictionary_confidence(),
            sensor,
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn has_sensor(&self) -> bool {
        self.sensor.is_some()
    }

    /// Neutralize `text`. `filepath` is used for logging only.
    pub fn neutralize(&self, text: &str, filepath: &str) -> Result<NeutralizationOutcome, NeutralizerError> {
        let mut rewrites = Vec::new();
        let mut edits = EditMap::new();
        let mut current = text.to_string();

        for rule in rules::pattern_rules() {
            let Some(re) = rule.regex.as_ref() else {
                tracing::warn!(rule = rule.kind.as_str(), "title pattern unavailable");
                continue;
            };
            if let Some(next) = rules::rewrite_all(
                &current,
                re,
                Replacement::Template(rule.replacement),
                rule.kind,
                1.0,
                &mut rewrites,
                &mut edits,
            ) {
                current = next;
            }
        }

        current = self
            .dictionary
            .apply(current, self.dictionary_confidence, &mut rewrites, &mut edits);

        let flags = match &self.sensor {
            Some(sensor) => sensor.scan(&current, &edits)?,
            None => Vec::new(),
        };

        tracing::debug!(
            filepath = %filepath,
            rewrites = rewrites.len(),
            flags = flags.len(),
            "tier-3 complete"
        );

        let mut events: Vec<Tier3Event> = rewrites
            .into_iter()
            .map(Tier3Event::Neutralized)
            .chain(flags.into_iter().map(Tier3Event::Flagged))
            .collect();
        if events.is_empty() {
            events.push(Tier3Event::NoAction);
        }

        Ok(NeutralizationOutcome {
            text: current,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comply_core::models::RuleKind;
    use test_fixtures::StubMorphAnalyzer;

    fn neutralizer(terms: Vec<NeutralTerm>) -> Neutralizer {
        Neutralizer::new(
            &NeutralizerConfig::default(),
            terms,
            Some(Arc::new(StubMorphAnalyzer::german())),
        )
        .unwrap()
    }

    #[test]
    fn example_document() {
        let out = neutralizer(Vec::new())
            .neutralize(
                "Kontakt: [EMAIL], Tel [PHONE_DE]. Frau Bankkauffrau Müller.",
                "cv.pdf",
            )
            .unwrap();
        assert_eq!(out.text, "Kontakt: [EMAIL], Tel [PHONE_DE]. Frau Bankfachkraft Müller.");
        assert_eq!(out.rewrite_count(), 1);
        assert_eq!(out.flag_count(), 1);
        match &out.events[1] {
            Tier3Event::Flagged(flag) => assert_eq!(flag.term, "Frau"),
            other => panic!("expected flag, got {other:?}"),
        }
        assert_eq!(out.confidence_floor(), 0.75);
    }

    #[test]
    fn rewritten_titles_are_not_flagged() {
        // "Fachkraft" is feminine and ends in a person suffix.
        let out = neutralizer(Vec::new())
            .neutralize("Kaufmann im Einzelhandel", "cv.pdf")
            .unwrap();
        assert_eq!(out.text, "Fachkraft im Einzelhandel");
        assert_eq!(out.flag_count(), 0);
    }

    #[test]
    fn dictionary_runs_after_patterns() {
        let out = neutralizer(vec![NeutralTerm::new("Leiterin", "Leitung", "job")])
            .neutralize("Industriekauffrau und Leiterin", "cv.pdf")
            .unwrap();
        assert_eq!(out.text, "Industriefachkraft und Leitung");
        let kinds: Vec<RuleKind> = out
            .events
            .iter()
            .filter_map(|e| match e {
                Tier3Event::Neutralized(n) => Some(n.rule_kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, [RuleKind::PatternGroup, RuleKind::Dictionary]);
        assert_eq!(out.confidence_floor(), 0.9);
    }

    #[test]
    fn clean_text_yields_no_action() {
        let out = neutralizer(Vec::new())
            .neutralize("Projektarbeit im Team", "cv.pdf")
            .unwrap();
        assert_eq!(out.events, [Tier3Event::NoAction]);
        assert_eq!(out.confidence_floor(), 1.0);
    }

    #[test]
    fn disabled_sensor_skips_analysis() {
        let config = NeutralizerConfig {
            sensor_enabled: Some(false),
            ..Default::default()
        };
        let n = Neutralizer::new(&config, Vec::new(), Some(Arc::new(StubMorphAnalyzer::failing("x")))).unwrap();
        assert!(!n.has_sensor());
        assert!(n.neutralize("Frau", "cv.pdf").is_ok());
    }

    #[test]
    fn invalid_table_is_rejected() {
        let err = Neutralizer::new(
            &NeutralizerConfig::default(),
            vec![NeutralTerm::new("Lehrer", "Lehrer", "job")],
            None,
        );
        assert!(err.is_err());
    }
}
