//! # comply-pipeline
//!
//! Wires the stages together: layout → Tier-1/manual/Tier-2 detection →
//! merge → redaction → Tier-3 → scoring → ledger. One document is a
//! synchronous transform; batches fan documents out over a rayon pool.

pub mod batch;
pub mod builder;
pub mod degradation;
pub mod document;
pub mod report;

pub use batch::BatchReport;
pub use builder::PipelineBuilder;
pub use degradation::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use document::ComplyPipeline;
pub use report::{DocumentReport, DocumentStatus};
