//! Document text normalization.
//!
//! Output offsets are what every detector reports against, so this runs
//! exactly once per document, before detection.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

/// All-caps runs of German letters, delimited by word boundaries.
static SHOUTING_WORD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b[A-ZÄÖÜß]{2,}\b").ok());

/// Minimum length (in characters) of an all-caps word that gets title-cased.
const SHOUTING_MIN_CHARS: usize = 4;

/// Normalize extracted text:
/// tabs and non-breaking spaces become spaces, lines are trimmed, empty
/// lines dropped, space runs collapsed, all-caps words of four or more
/// letters title-cased (when enabled). The result is NFC.
pub fn normalize_text(raw: &str, titlecase_shouting: bool) -> String {
    let composed: String = raw
        .nfc()
        .map(|c| if c == '\t' || c == '\u{a0}' { ' ' } else { c })
        .collect();

    let lines: Vec<String> = composed
        .lines()
        .map(collapse_spaces)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if titlecase_shouting {
                titlecase_shouting_words(&line)
            } else {
                line
            }
        })
        .collect();

    lines.join("\n").nfc().collect()
}

/// Trim and collapse runs of spaces to one.
fn collapse_spaces(line: &str) -> String {
    line.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// `MÜLLER` → `Müller`; shorter runs such as `IT` or `SAP` are kept.
pub fn titlecase_shouting_words(line: &str) -> String {
    let Some(re) = SHOUTING_WORD.as_ref() else {
        return line.to_string();
    };
    re.replace_all(line, |caps: &Captures<'_>| {
        let word = &caps[0];
        if word.chars().count() < SHOUTING_MIN_CHARS {
            return word.to_string();
        }
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => {
                let mut out = String::with_capacity(word.len());
                out.push(first);
                out.extend(chars.flat_map(char::to_lowercase));
                out
            }
            None => String::new(),
        }
    })
    .into_owned()
}
