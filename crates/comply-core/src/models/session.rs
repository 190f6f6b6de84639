use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::audit::truncate_to_micros;
use super::score::{ComplianceGrade, DocumentScore};

/// One processed document within a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub file_name: String,
    pub pii_count: usize,
    pub neutralization_count: usize,
    pub trust_score: f64,
    pub grade: ComplianceGrade,
    pub processed_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn new(
        session_id: &str,
        file_name: &str,
        pii_count: usize,
        neutralization_count: usize,
        score: &DocumentScore,
    ) -> Self {
        Self {
            session_id: session_id.to_string(),
            file_name: file_name.to_string(),
            pii_count,
            neutralization_count,
            trust_score: score.trust_score,
            grade: score.grade,
            processed_at: truncate_to_micros(Utc::now()),
        }
    }
}
