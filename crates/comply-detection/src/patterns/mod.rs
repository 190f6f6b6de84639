//! Tier-1 pattern table.

pub mod guards;
pub mod tier1;

use regex::Regex;
use std::sync::LazyLock;

/// Accepts or rejects a regex match given the full text and the match span.
pub type MatchGuard = fn(text: &str, start: usize, end: usize) -> bool;

/// A compiled Tier-1 rule.
pub struct Tier1Rule {
    pub label: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    /// Context check for constructs the regex engine cannot express.
    pub guard: Option<MatchGuard>,
}

/// A raw pattern match before it becomes a hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub label: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Collect every non-overlapping match of `rule`. When the guard rejects a
/// match, searching resumes one character after the rejected start.
pub fn collect_matches(text: &str, rule: &Tier1Rule, out: &mut Vec<RawMatch>) {
    let Some(re) = rule.regex.as_ref() else { return };
    let mut pos = 0;
    while pos <= text.len() {
        let Some(m) = re.find_at(text, pos) else { break };
        let accepted = rule.guard.map_or(true, |g| g(text, m.start(), m.end()));
        if accepted && m.end() > m.start() {
            out.push(RawMatch {
                label: rule.label,
                start: m.start(),
                end: m.end(),
            });
            pos = m.end();
        } else {
            pos = next_char_boundary(text, m.start());
        }
    }
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| from + c.len_utf8())
}
