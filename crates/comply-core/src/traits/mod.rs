//! Collaborator traits at the edges of the pipeline.

pub mod cancellation;
pub mod dictionary;
pub mod extractor;
pub mod ledger;
pub mod morphology;
pub mod recognizer;

pub use cancellation::{Cancellable, CancellationToken};
pub use dictionary::{NeutralTermSource, StaticTerms};
pub use extractor::DocumentExtractor;
pub use ledger::{ApprovalGate, LedgerStore};
pub use morphology::{Gender, MorphAnalyzer, MorphToken, PartOfSpeech};
pub use recognizer::{EntityRecognizer, RecognizedEntity, SpanKey};
