//! # comply-scoring
//!
//! Document trust scoring. One weak stage dominates the score instead of
//! being averaged away.

pub mod scorer;

pub use scorer::{ScoreInputs, TrustScorer};
