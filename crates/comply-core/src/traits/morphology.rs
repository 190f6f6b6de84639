use serde::{Deserialize, Serialize};

use crate::errors::NeutralizerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Pronoun,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

/// One analyzed token. Offsets are byte offsets into the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub pos: PartOfSpeech,
    pub entity_type: Option<String>,
    pub gender: Option<Gender>,
}

/// Morphological analysis used to find residual gendered terms.
pub trait MorphAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    fn analyze(&self, text: &str) -> Result<Vec<MorphToken>, NeutralizerError>;
}
