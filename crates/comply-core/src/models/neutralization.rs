use serde::{Deserialize, Serialize};

/// Which Tier-3 rule produced a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Compound job title with a gendered suffix pair.
    PatternGroup,
    /// Bare title token or title + preposition idiom.
    PatternTitle,
    /// Entry from the neutral-term dictionary.
    Dictionary,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatternGroup => "pattern_group",
            Self::PatternTitle => "pattern_title",
            Self::Dictionary => "dictionary",
        }
    }
}

/// One rewrite performed by the neutralizer. Offsets refer to the text as it
/// was immediately before this rewrite was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralizationEvent {
    pub rule_kind: RuleKind,
    pub matched_text: String,
    pub replacement: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
}

/// A gendered term that was detected but left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFlag {
    pub term: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
}

/// Ordered output of the neutralizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tier3Event {
    Neutralized(NeutralizationEvent),
    Flagged(ComplianceFlag),
    NoAction,
}

impl Tier3Event {
    /// Confidence carried by the event. `NoAction` is informational and has none.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Neutralized(e) => Some(e.confidence),
            Self::Flagged(f) => Some(f.confidence),
            Self::NoAction => None,
        }
    }
}

/// Dictionary entry mapping a gendered term to its neutral form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralTerm {
    pub original: String,
    pub neutral: String,
    pub category: String,
}

impl NeutralTerm {
    pub fn new(
        original: impl Into<String>,
        neutral: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            original: original.into(),
            neutral: neutral.into(),
            category: category.into(),
        }
    }
}
