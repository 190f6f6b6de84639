//! Tier-1 deterministic scanner.

use comply_core::models::{Hit, HitSource};

use crate::patterns::{self, tier1, RawMatch, Tier1Rule};

/// Runs the Tier-1 rule table over normalized text.
///
/// Every match becomes a `Regex` hit with confidence 1.0. Overlaps between
/// rules are kept; resolving them is the merger's job.
pub struct Tier1Scanner {
    rules: Vec<Tier1Rule>,
}

impl Tier1Scanner {
    pub fn new() -> Self {
        Self {
            rules: tier1::all_rules(),
        }
    }

    /// Labels of rules whose pattern failed to compile. Such rules produce
    /// no matches.
    pub fn unavailable_rules(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|r| r.regex.is_none())
            .map(|r| r.label)
            .collect()
    }

    /// Raw hits in rule order, then position.
    pub fn scan(&self, text: &str) -> Vec<Hit> {
        let mut matches: Vec<RawMatch> = Vec::new();
        for rule in &self.rules {
            patterns::collect_matches(text, rule, &mut matches);
        }
        matches
            .into_iter()
            .map(|m| Hit::new(m.start, m.end, m.label, HitSource::Regex, 1.0))
            .collect()
    }
}

impl Default for Tier1Scanner {
    fn default() -> Self {
        Self::new()
    }
}
