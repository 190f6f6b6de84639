//! Fixed job-title pattern rules and the shared rewrite primitive.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use comply_core::models::{NeutralizationEvent, RuleKind};

use crate::edits::EditMap;

macro_rules! title_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// Compound titles: "Bankkauffrau" → "Bankfachkraft".
title_pattern!(RE_COMPOUND_KAUF, r"(?i)\b(\w+)(kaufmann|kauffrau)\b");
// Title + preposition idiom: "Kaufmann für Büromanagement".
title_pattern!(RE_KAUF_FUER, r"(?i)\b(Kaufmann|Kauffrau)\s+für\b");
// Bare title followed by another word.
title_pattern!(RE_KAUF_BARE, r"(?i)\b(Kaufmann|Kauffrau)\s\b");

/// How a match is turned into replacement text.
#[derive(Debug, Clone, Copy)]
pub enum Replacement<'a> {
    /// `$1`-style template expanded against the match's capture groups.
    Template(&'a str),
    /// Inserted as-is.
    Literal(&'a str),
}

/// One job-title pattern rule.
pub struct PatternRule {
    pub kind: RuleKind,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub replacement: &'static str,
}

/// Pattern rules in application order.
pub fn pattern_rules() -> Vec<PatternRule> {
    vec![
        PatternRule {
            kind: RuleKind::PatternGroup,
            regex: &RE_COMPOUND_KAUF,
            replacement: "${1}fachkraft",
        },
        PatternRule {
            kind: RuleKind::PatternTitle,
            regex: &RE_KAUF_FUER,
            replacement: "Fachkraft für",
        },
        PatternRule {
            kind: RuleKind::PatternTitle,
            regex: &RE_KAUF_BARE,
            replacement: "Fachkraft ",
        },
    ]
}

/// True if any pattern rule would rewrite something in `text`.
pub fn any_pattern_matches(text: &str) -> bool {
    pattern_rules()
        .iter()
        .filter_map(|r| r.regex.as_ref())
        .any(|re| re.is_match(text))
}

/// Rewrite every match of `re` in `text`, left to right.
///
/// Each rewrite emits one event whose offsets refer to the text as it stood
/// right before that rewrite, and is recorded in `edits`. Returns `None`
/// when nothing matched.
pub fn rewrite_all(
    text: &str,
    re: &Regex,
    replacement: Replacement<'_>,
    kind: RuleKind,
    confidence: f64,
    events: &mut Vec<NeutralizationEvent>,
    edits: &mut EditMap,
) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut delta: isize = 0;
    let mut matched = false;

    for caps in re.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        matched = true;
        let rep = render(&caps, replacement);

        let start = m.start().saturating_add_signed(delta);
        let old_end = m.end().saturating_add_signed(delta);
        events.push(NeutralizationEvent {
            rule_kind: kind,
            matched_text: m.as_str().to_string(),
            replacement: rep.clone(),
            start,
            end: old_end,
            confidence,
        });
        edits.record(start, old_end, rep.len());

        out.push_str(&text[cursor..m.start()]);
        out.push_str(&rep);
        cursor = m.end();
        delta += rep.len() as isize - m.len() as isize;
    }

    if !matched {
        return None;
    }
    out.push_str(&text[cursor..]);
    Some(out)
}

fn render(caps: &Captures<'_>, replacement: Replacement<'_>) -> String {
    match replacement {
        Replacement::Literal(s) => s.to_string(),
        Replacement::Template(t) => {
            let mut dst = String::new();
            caps.expand(t, &mut dst);
            dst
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_rule(idx: usize, text: &str) -> (Option<String>, Vec<NeutralizationEvent>) {
        let rules = pattern_rules();
        let rule = &rules[idx];
        let mut events = Vec::new();
        let mut edits = EditMap::new();
        let out = rewrite_all(
            text,
            rule.regex.as_ref().unwrap(),
            Replacement::Template(rule.replacement),
            rule.kind,
            1.0,
            &mut events,
            &mut edits,
        );
        (out, events)
    }

    #[test]
    fn all_patterns_compile() {
        assert!(pattern_rules().iter().all(|r| r.regex.is_some()));
    }

    #[test]
    fn compound_title_keeps_prefix() {
        let (out, events) = apply_rule(0, "Ausbildung zur Bankkauffrau und Industriekaufmann");
        assert_eq!(
            out.as_deref(),
            Some("Ausbildung zur Bankfachkraft und Industriefachkraft")
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].matched_text, "Bankkauffrau");
        assert_eq!(events[0].start, 15);
        // Second offset is in the text after the first rewrite (one byte longer).
        assert_eq!(events[1].start, 32 + 1);
    }

    #[test]
    fn compound_match_is_case_insensitive() {
        let (out, _) = apply_rule(0, "BANKKAUFMANN");
        assert_eq!(out.as_deref(), Some("BANKfachkraft"));
    }

    #[test]
    fn preposition_idiom() {
        let (out, events) = apply_rule(1, "Kauffrau  für Büromanagement");
        assert_eq!(out.as_deref(), Some("Fachkraft für Büromanagement"));
        assert_eq!(events[0].rule_kind, RuleKind::PatternTitle);
    }

    #[test]
    fn bare_title() {
        let (out, _) = apply_rule(2, "Kaufmann im Einzelhandel");
        assert_eq!(out.as_deref(), Some("Fachkraft im Einzelhandel"));
        let (none, events) = apply_rule(2, "Kaufmann.");
        assert!(none.is_none());
        assert!(events.is_empty());
    }
}
