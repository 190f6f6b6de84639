//! German résumé PII patterns, in evaluation order.

use regex::Regex;
use std::sync::LazyLock;

use super::guards::web_guard;
use super::Tier1Rule;

macro_rules! tier1_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Email ──────────────────────────────────────────────────────────────────
tier1_pattern!(
    RE_EMAIL,
    r"[a-zA-Z0-9_.+\-]+@[a-zA-Z0-9\-]+\.[a-zA-Z0-9.\-]+"
);

// ── German phone numbers (optional +49, area code, 6–11 digit subscriber) ──
tier1_pattern!(
    RE_PHONE_DE,
    r"(?:(?:\+?49[ \-\.\(\)]?)?(?:(?:\(?0\d{1,5}\)?)|(?:\d{1,5}))[ \-\.\(\)]?(?:\d[ \-\.\(\)]?){5,10}\d)"
);

// ── Web addresses (context rules in `guards::web_guard`) ──────────────────
tier1_pattern!(
    RE_WEB,
    r#"\b(?:https?://)?(?:www\.)?(?:[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}(?::\d+)?(?:/[^\s<>"'@]*)?\b"#
);

// ── Social handles ─────────────────────────────────────────────────────────
tier1_pattern!(RE_SOCIAL, r"@[A-Za-z0-9](?:[A-Za-z0-9._\-]{1,28}[A-Za-z0-9])?");

// ── Postal code ────────────────────────────────────────────────────────────
tier1_pattern!(RE_POSTAL_CODE, r"\b\d{5}\b");

// ── Dates ──────────────────────────────────────────────────────────────────
tier1_pattern!(RE_DATE_NUMERIC, r"\b\d{1,2}\.\d{1,2}\.(\d{4}|\d{2})\b");
tier1_pattern!(
    RE_DATE_MONTH_NAME,
    r"(?i)\b\d{1,2}\.\s(?:Januar|Februar|März|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)\s\d{4}\b"
);
tier1_pattern!(
    RE_DATE_MONTH_NAME_2DIGIT_DAY,
    r"(?i)\b\d{2}\.\s(?:Januar|Februar|März|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)\s\d{4}\b"
);
tier1_pattern!(
    RE_DATE_MONTH_NAME_SHORT_YEAR,
    r"(?i)\b\d{1,2}\.\s(?:Januar|Februar|März|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)\s'\d{2}\b"
);

/// All Tier-1 rules in evaluation order. Order matters for equal-span ties
/// in the merger.
pub fn all_rules() -> Vec<Tier1Rule> {
    vec![
        Tier1Rule { label: "EMAIL", regex: &RE_EMAIL, guard: None },
        Tier1Rule { label: "PHONE_DE", regex: &RE_PHONE_DE, guard: None },
        Tier1Rule { label: "WEB", regex: &RE_WEB, guard: Some(web_guard) },
        Tier1Rule { label: "SOCI", regex: &RE_SOCIAL, guard: None },
        Tier1Rule { label: "LOC", regex: &RE_POSTAL_CODE, guard: None },
        Tier1Rule { label: "DATE", regex: &RE_DATE_NUMERIC, guard: None },
        Tier1Rule { label: "DATE", regex: &RE_DATE_MONTH_NAME, guard: None },
        Tier1Rule { label: "DATE", regex: &RE_DATE_MONTH_NAME_2DIGIT_DAY, guard: None },
        Tier1Rule { label: "DATE", regex: &RE_DATE_MONTH_NAME_SHORT_YEAR, guard: None },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for rule in all_rules() {
            assert!(rule.regex.is_some(), "pattern for {} failed to compile", rule.label);
        }
    }
}
