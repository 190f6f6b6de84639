//! # comply-detection
//!
//! PII detection for normalized document text.
//!
//! Tier-1 patterns, the Tier-2 recognizer adapter, and manual overrides all
//! report into one [`HitSet`](comply_core::models::HitSet). The merger turns
//! it into a non-overlapping [`ResolvedHitSet`](comply_core::models::ResolvedHitSet)
//! and the actuator applies that to the text back-to-front.

pub mod actuator;
pub mod manual;
pub mod merger;
pub mod patterns;
pub mod recognizer;
pub mod scanner;

pub use actuator::RedactionActuator;
pub use manual::ManualOverrides;
pub use merger::{merge, MergeOutcome};
pub use recognizer::{RecognizerAdapter, RecognizerPool};
pub use scanner::Tier1Scanner;
