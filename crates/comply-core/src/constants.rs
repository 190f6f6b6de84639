//! Shared constants.

/// Recognizer labels kept by default.
pub const DEFAULT_RECOGNIZER_LABELS: &[&str] = &["PER", "LOC", "PHONE", "EMAIL"];

/// Label prefix for street entities from the deterministic sub-rule.
pub const STREET_LABEL_PREFIX: &str = "LOC_STR";

/// Lowercase suffixes of person-related German nouns.
pub const PERSON_SUFFIXES: &[&str] = &[
    "er", "in", "ent", "ant", "ist", "ling", "kraft", "experte", "leiter",
];

/// Entity types that mark a token as a person.
pub const PERSON_ENTITY_TYPES: &[&str] = &["PER"];

/// Entity types never flagged.
pub const EXCLUDED_ENTITY_TYPES: &[&str] = &["DATE", "TIME", "CARDINAL"];

/// Tokens that end in a person suffix but are not people.
pub const FALSE_POSITIVE_TERMS: &[&str] = &[
    "september", "oktober", "november", "dezember", "zimmer", "nummer", "uhr",
];

/// Decimal places kept for recognizer-derived confidences.
pub const CONFIDENCE_DECIMALS: i32 = 4;

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "COMPLY_LOG";
