use crate::errors::NeutralizerError;
use crate::models::NeutralTerm;

/// Read-only source of neutral-term mappings.
pub trait NeutralTermSource {
    fn load_neutral_terms(&self) -> Result<Vec<NeutralTerm>, NeutralizerError>;
}

/// In-memory term list, e.g. parsed from a seed file.
#[derive(Debug, Clone, Default)]
pub struct StaticTerms(pub Vec<NeutralTerm>);

impl NeutralTermSource for StaticTerms {
    fn load_neutral_terms(&self) -> Result<Vec<NeutralTerm>, NeutralizerError> {
        Ok(self.0.clone())
    }
}
