//! Redaction actuator.

use comply_core::errors::DetectionError;
use comply_core::models::{Hit, MaskingMode, ResolvedHitSet};

/// Applies a resolved hit set to its source text.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactionActuator {
    mode: MaskingMode,
}

impl RedactionActuator {
    pub fn new(mode: MaskingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MaskingMode {
        self.mode
    }

    /// Replace every hit, last one first, so offsets of the untouched prefix
    /// stay valid.
    pub fn redact(&self, text: &str, resolved: &ResolvedHitSet) -> Result<String, DetectionError> {
        resolved.verify_against(text)?;
        let mut out = text.to_string();
        for hit in resolved.hits().iter().rev() {
            let replacement = self.placeholder(text, hit);
            out.replace_range(hit.start..hit.end, &replacement);
        }
        Ok(out)
    }

    fn placeholder(&self, text: &str, hit: &Hit) -> String {
        match self.mode {
            MaskingMode::Label => format!("[{}]", hit.label),
            MaskingMode::Star => "*".repeat(hit.slice(text).map_or(0, |s| s.chars().count())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comply_core::models::HitSource;

    fn resolved(text: &str, spans: &[(usize, usize, &str)]) -> ResolvedHitSet {
        let hits = spans
            .iter()
            .map(|(s, e, l)| Hit::new(*s, *e, *l, HitSource::Regex, 1.0))
            .collect();
        ResolvedHitSet::try_new(text, hits).unwrap()
    }

    #[test]
    fn label_mode_writes_placeholders() {
        let text = "Mail a@b.de oder 0151 1234567";
        let set = resolved(text, &[(5, 11, "EMAIL"), (17, 29, "PHONE_DE")]);
        let out = RedactionActuator::new(MaskingMode::Label).redact(text, &set).unwrap();
        assert_eq!(out, "Mail [EMAIL] oder [PHONE_DE]");
    }

    #[test]
    fn star_mode_preserves_character_count() {
        let text = "Frau Müller kommt";
        let set = resolved(text, &[(5, 12, "PER")]);
        let out = RedactionActuator::new(MaskingMode::Star).redact(text, &set).unwrap();
        assert_eq!(out, "Frau ****** kommt");
        assert_eq!(out.chars().count(), text.chars().count());
    }

    #[test]
    fn rejects_set_built_for_other_text() {
        let set = resolved("abcdef", &[(0, 3, "X")]);
        let err = RedactionActuator::default().redact("abcdeg", &set).unwrap_err();
        assert!(matches!(err, DetectionError::CoordinateMismatch { .. }));
    }
}
