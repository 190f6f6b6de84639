//! # comply-neutralizer
//!
//! Tier-3 of the pipeline. Gendered job-title language is rewritten by a
//! fixed set of pattern rules and then by the neutral-term dictionary
//! (longest original first). A morphological sensor flags gendered person
//! terms that neither step touched; flags are never applied to the text.

pub mod dictionary;
pub mod edits;
pub mod neutralizer;
pub mod rules;
pub mod sensor;

pub use dictionary::{validate_terms, Dictionary};
pub use neutralizer::{NeutralizationOutcome, Neutralizer};
pub use sensor::GenderSensor;
