//! Data model shared across pipeline stages.

pub mod audit;
pub mod hit;
pub mod layout;
pub mod neutralization;
pub mod review;
pub mod score;
pub mod session;
pub mod word;

pub use audit::{AuditRecord, EventCode};
pub use hit::{
    validate_span, ConflictResolution, Hit, HitSet, HitSource, MaskingMode, ResolvedHitSet,
    TextDigest,
};
pub use layout::{DocumentLayout, LayoutStrategy, PageLayout};
pub use neutralization::{ComplianceFlag, NeutralTerm, NeutralizationEvent, RuleKind, Tier3Event};
pub use review::{
    CommitReceipt, CommitRejection, CommitRequest, FinalCommit, PendingReview, ReviewStatus,
    UpsertOutcome,
};
pub use score::{ComplianceGrade, DocumentScore};
pub use session::SessionSummary;
pub use word::{Page, Word};
