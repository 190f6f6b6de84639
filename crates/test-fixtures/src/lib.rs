//! Test fixture loader and deterministic stub collaborators for Comply tests.
//!
//! Golden datasets live under `golden/` next to this crate. The stubs stand
//! in for the extractor, recognizer, and morphology backends so pipeline
//! behaviour can be pinned without a PDF parser or an NLP model.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use comply_core::errors::{DetectionError, ExtractionError, NeutralizerError};
use comply_core::models::{Page, Word};
use comply_core::traits::{
    DocumentExtractor, EntityRecognizer, Gender, MorphAnalyzer, MorphToken, PartOfSpeech,
    RecognizedEntity, SpanKey,
};
use serde::de::DeserializeOwned;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// Relative fixture path (e.g. `golden/layout/sidebar.json`) for a listed file.
pub fn relative_fixture_path(path: &Path) -> String {
    path.strip_prefix(fixtures_root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Byte offsets of every occurrence of `needle` in `haystack`.
fn occurrences(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(needle)
        .map(|(i, m)| (i, i + m.len()))
        .collect()
}

// ---------------------------------------------------------------------------
// Recognizer stub
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct StubEntity {
    phrase: String,
    label: String,
    raw_confidence: Option<f64>,
    rule_id: Option<String>,
    rescore: Option<f64>,
}

/// Recognizer that reports every literal occurrence of configured phrases.
#[derive(Debug, Clone, Default)]
pub struct StubRecognizer {
    entities: Vec<StubEntity>,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
    rescore_calls: Arc<AtomicUsize>,
}

impl StubRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `phrase` as `label` with an intrinsic confidence.
    pub fn entity(mut self, phrase: &str, label: &str, raw_confidence: f64) -> Self {
        self.entities.push(StubEntity {
            phrase: phrase.to_string(),
            label: label.to_string(),
            raw_confidence: Some(raw_confidence),
            rule_id: None,
            rescore: None,
        });
        self
    }

    /// Report `phrase` without intrinsic confidence; `rescore` answers the
    /// alternative-path lookup (absent → no entry).
    pub fn beam_entity(mut self, phrase: &str, label: &str, rescore: Option<f64>) -> Self {
        self.entities.push(StubEntity {
            phrase: phrase.to_string(),
            label: label.to_string(),
            raw_confidence: None,
            rule_id: None,
            rescore,
        });
        self
    }

    /// Report `phrase` as produced by a deterministic sub-rule.
    pub fn rule_entity(mut self, phrase: &str, label: &str, rule_id: &str) -> Self {
        self.entities.push(StubEntity {
            phrase: phrase.to_string(),
            label: label.to_string(),
            raw_confidence: None,
            rule_id: Some(rule_id.to_string()),
            rescore: Some(0.1),
        });
        self
    }

    /// Sub-rule entity that also carries an intrinsic confidence.
    pub fn scored_rule_entity(
        mut self,
        phrase: &str,
        label: &str,
        rule_id: &str,
        raw_confidence: f64,
    ) -> Self {
        self.entities.push(StubEntity {
            phrase: phrase.to_string(),
            label: label.to_string(),
            raw_confidence: Some(raw_confidence),
            rule_id: Some(rule_id.to_string()),
            rescore: None,
        });
        self
    }

    /// Every call fails with `RecognizerUnavailable`.
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Number of `recognize` calls across all clones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `rescore` calls across all clones.
    pub fn rescore_count(&self) -> usize {
        self.rescore_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DetectionError> {
        match &self.failure {
            Some(reason) => Err(DetectionError::RecognizerUnavailable {
                recognizer: "stub".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl EntityRecognizer for StubRecognizer {
    fn name(&self) -> &str {
        "stub"
    }

    fn recognize(&mut self, text: &str) -> Result<Vec<RecognizedEntity>, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut out = Vec::new();
        for e in &self.entities {
            for (start, end) in occurrences(text, &e.phrase) {
                out.push(RecognizedEntity {
                    start,
                    end,
                    label: e.label.clone(),
                    raw_confidence: e.raw_confidence,
                    rule_id: e.rule_id.clone(),
                });
            }
        }
        out.sort_by_key(|e| e.start);
        Ok(out)
    }

    fn rescore(&mut self, text: &str) -> Result<HashMap<SpanKey, f64>, DetectionError> {
        self.rescore_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut scores = HashMap::new();
        for e in &self.entities {
            if let Some(score) = e.rescore {
                for (start, end) in occurrences(text, &e.phrase) {
                    scores.insert(SpanKey::new(start, end, e.label.clone()), score);
                }
            }
        }
        Ok(scores)
    }
}

// ---------------------------------------------------------------------------
// Morphology stub
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Lexeme {
    pos: PartOfSpeech,
    entity_type: Option<String>,
    gender: Option<Gender>,
}

/// Tokenizes on non-alphanumeric characters and looks tokens up in a small
/// lexicon. Unknown tokens are `Other` without gender.
#[derive(Debug, Clone, Default)]
pub struct StubMorphAnalyzer {
    lexicon: HashMap<String, Lexeme>,
    failure: Option<String>,
}

impl StubMorphAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer that knows the common German person nouns used in tests.
    pub fn german() -> Self {
        Self::new()
            .word("Frau", PartOfSpeech::Noun, Some("PER"), Some(Gender::Feminine))
            .word("Herr", PartOfSpeech::Noun, Some("PER"), Some(Gender::Masculine))
            .word("Müller", PartOfSpeech::ProperNoun, Some("PER"), None)
            .word("Entwickler", PartOfSpeech::Noun, None, Some(Gender::Masculine))
            .word("Entwicklerin", PartOfSpeech::Noun, None, Some(Gender::Feminine))
            .word("Leiterin", PartOfSpeech::Noun, None, Some(Gender::Feminine))
            .word("sie", PartOfSpeech::Pronoun, None, Some(Gender::Feminine))
            .word("er", PartOfSpeech::Pronoun, None, Some(Gender::Masculine))
            .word("Dezember", PartOfSpeech::Noun, Some("DATE"), Some(Gender::Masculine))
            .word("Nummer", PartOfSpeech::Noun, None, Some(Gender::Feminine))
            .word("Computer", PartOfSpeech::Noun, None, Some(Gender::Masculine))
            .word("Fachkraft", PartOfSpeech::Noun, None, Some(Gender::Feminine))
    }

    pub fn word(
        mut self,
        token: &str,
        pos: PartOfSpeech,
        entity_type: Option<&str>,
        gender: Option<Gender>,
    ) -> Self {
        self.lexicon.insert(
            token.to_string(),
            Lexeme {
                pos,
                entity_type: entity_type.map(str::to_string),
                gender,
            },
        );
        self
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }
}

impl MorphAnalyzer for StubMorphAnalyzer {
    fn name(&self) -> &str {
        "stub-morph"
    }

    fn analyze(&self, text: &str) -> Result<Vec<MorphToken>, NeutralizerError> {
        if let Some(reason) = &self.failure {
            return Err(NeutralizerError::AnalyzerFailed {
                analyzer: "stub-morph".to_string(),
                reason: reason.clone(),
            });
        }
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;
        let boundaries = text
            .char_indices()
            .chain(std::iter::once((text.len(), ' ')));
        for (i, c) in boundaries {
            let is_word = c.is_alphanumeric() && i < text.len();
            match (start, is_word) {
                (None, true) => start = Some(i),
                (Some(s), false) => {
                    let token = &text[s..i];
                    let lex = self.lexicon.get(token);
                    tokens.push(MorphToken {
                        text: token.to_string(),
                        start: s,
                        end: i,
                        pos: lex.map_or(PartOfSpeech::Other, |l| l.pos),
                        entity_type: lex.and_then(|l| l.entity_type.clone()),
                        gender: lex.and_then(|l| l.gender),
                    });
                    start = None;
                }
                _ => {}
            }
        }
        Ok(tokens)
    }
}

// ---------------------------------------------------------------------------
// Extractor stub
// ---------------------------------------------------------------------------

/// Extractor serving pre-built pages keyed by path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExtractor {
    documents: HashMap<PathBuf, Result<Vec<Page>, String>>,
}

impl InMemoryExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<PathBuf>, pages: Vec<Page>) -> Self {
        self.documents.insert(path.into(), Ok(pages));
        self
    }

    /// Single-page document laid out one line per entry of `lines`.
    pub fn with_text(self, path: impl Into<PathBuf>, lines: &[&str]) -> Self {
        self.with_document(path, vec![page_from_lines(lines)])
    }

    pub fn with_failure(mut self, path: impl Into<PathBuf>, reason: &str) -> Self {
        self.documents.insert(path.into(), Err(reason.to_string()));
        self
    }
}

impl DocumentExtractor for InMemoryExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>, ExtractionError> {
        match self.documents.get(path) {
            Some(Ok(pages)) => Ok(pages.clone()),
            Some(Err(reason)) => Err(ExtractionError::Malformed {
                path: path.display().to_string(),
                reason: reason.clone(),
            }),
            None => Err(ExtractionError::Unreadable {
                path: path.display().to_string(),
                reason: "no such document".to_string(),
            }),
        }
    }

    fn extract_raw_text(&self, path: &Path, _layout_aware: bool) -> Result<String, ExtractionError> {
        let pages = self.extract_pages(path)?;
        Ok(pages
            .iter()
            .flat_map(|p| p.words.iter().map(|w| w.text.as_str()))
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Build a single-column page: one text line per entry, words spaced evenly
/// from the left margin. The page is wide enough that every word starts in
/// the left half.
pub fn page_from_lines(lines: &[&str]) -> Page {
    let mut words = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        let top = 100.0 + row as f64 * 20.0;
        let mut x = 70.0;
        for token in line.split_whitespace() {
            let width = 5.0 * token.chars().count() as f64;
            words.push(Word::new(token, x, x + width, top, top + 10.0));
            x += width + 4.0;
        }
    }
    Page {
        width: 4000.0,
        height: 800.0,
        words,
    }
}
