//! Candidate PII spans and the coordinate-space guards around them.

use serde::{Deserialize, Serialize};

use crate::errors::DetectionError;

/// Which detector produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitSource {
    Regex,
    Recognizer,
    Manual,
}

impl HitSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Recognizer => "recognizer",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for HitSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate PII span. `start`/`end` are byte offsets into one specific text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub source: HitSource,
    pub confidence: f64,
}

impl Hit {
    /// Create a hit. Confidence is clamped to [0.0, 1.0]; NaN becomes 0.0.
    pub fn new(
        start: usize,
        end: usize,
        label: impl Into<String>,
        source: HitSource,
        confidence: f64,
    ) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            start,
            end,
            label: label.into(),
            source,
            confidence,
        }
    }

    /// Span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &Hit) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The covered slice of `text`, if the span is valid for it.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// Identity of a text string. Hits are only comparable within one digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextDigest([u8; 32]);

impl TextDigest {
    pub fn of(text: &str) -> Self {
        Self(*blake3::hash(text.as_bytes()).as_bytes())
    }

    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

/// Check that `start..end` is a non-empty, in-bounds span on char boundaries.
pub fn validate_span(text: &str, start: usize, end: usize) -> Result<(), DetectionError> {
    if start >= end
        || end > text.len()
        || !text.is_char_boundary(start)
        || !text.is_char_boundary(end)
    {
        return Err(DetectionError::SpanOutOfBounds {
            start,
            end,
            text_len: text.len(),
        });
    }
    Ok(())
}

fn check_digest(expected: &TextDigest, text: &str) -> Result<(), DetectionError> {
    let actual = TextDigest::of(text);
    if &actual != expected {
        return Err(DetectionError::CoordinateMismatch {
            expected: expected.to_hex(),
            actual: actual.to_hex(),
        });
    }
    Ok(())
}

/// Unmerged hits from any number of sources, bound to the text they were
/// computed over.
#[derive(Debug, Clone)]
pub struct HitSet {
    digest: TextDigest,
    hits: Vec<Hit>,
}

impl HitSet {
    pub fn new(text: &str) -> Self {
        Self {
            digest: TextDigest::of(text),
            hits: Vec::new(),
        }
    }

    pub fn with_hits(text: &str, hits: Vec<Hit>) -> Self {
        Self {
            digest: TextDigest::of(text),
            hits,
        }
    }

    pub fn push(&mut self, hit: Hit) {
        self.hits.push(hit);
    }

    /// Absorb hits from another set. Both sets must describe the same text.
    pub fn absorb(&mut self, other: HitSet) -> Result<(), DetectionError> {
        if other.digest != self.digest {
            return Err(DetectionError::CoordinateMismatch {
                expected: self.digest.to_hex(),
                actual: other.digest.to_hex(),
            });
        }
        self.hits.extend(other.hits);
        Ok(())
    }

    pub fn digest(&self) -> TextDigest {
        self.digest
    }

    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn into_hits(self) -> Vec<Hit> {
        self.hits
    }

    /// Fail fast unless this set was computed over `text` and every span is
    /// valid for it.
    pub fn verify_against(&self, text: &str) -> Result<(), DetectionError> {
        check_digest(&self.digest, text)?;
        for hit in &self.hits {
            validate_span(text, hit.start, hit.end)?;
        }
        Ok(())
    }
}

/// Ordered, pairwise non-overlapping hits over one text.
#[derive(Debug, Clone)]
pub struct ResolvedHitSet {
    digest: TextDigest,
    hits: Vec<Hit>,
}

impl ResolvedHitSet {
    /// Build a resolved set, sorting by `start` and rejecting overlaps or
    /// spans that are invalid for `text`.
    pub fn try_new(text: &str, mut hits: Vec<Hit>) -> Result<Self, DetectionError> {
        hits.sort_by_key(|h| (h.start, h.end));
        for hit in &hits {
            validate_span(text, hit.start, hit.end)?;
        }
        for pair in hits.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(DetectionError::OverlappingHits {
                    first_start: pair[0].start,
                    first_end: pair[0].end,
                    second_start: pair[1].start,
                    second_end: pair[1].end,
                });
            }
        }
        Ok(Self {
            digest: TextDigest::of(text),
            hits,
        })
    }

    pub fn empty(text: &str) -> Self {
        Self {
            digest: TextDigest::of(text),
            hits: Vec::new(),
        }
    }

    pub fn digest(&self) -> TextDigest {
        self.digest
    }

    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hit> {
        self.hits.iter()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Lowest confidence among accepted hits, `None` when empty.
    pub fn min_confidence(&self) -> Option<f64> {
        self.hits.iter().map(|h| h.confidence).reduce(f64::min)
    }

    pub fn verify_against(&self, text: &str) -> Result<(), DetectionError> {
        check_digest(&self.digest, text)
    }
}

/// A hit rejected by the merger and the accepted span it collided with.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictResolution {
    pub loser: Hit,
    pub winner_start: usize,
    pub winner_end: usize,
    pub winner_label: String,
}

/// How the actuator replaces a redacted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskingMode {
    /// `[LABEL]` placeholder.
    #[default]
    Label,
    /// One `*` per character of the original span.
    Star,
}
