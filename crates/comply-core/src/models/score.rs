use serde::{Deserialize, Serialize};

/// Document compliance grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceGrade {
    Pass,
    ReviewRequired,
}

impl ComplianceGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::ReviewRequired => "REVIEW_REQUIRED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PASS" => Some(Self::Pass),
            "REVIEW_REQUIRED" => Some(Self::ReviewRequired),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComplianceGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-document trust assessment. Derived per run, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentScore {
    pub layout_confidence: f64,
    pub detection_confidence_floor: f64,
    pub neutralization_confidence_floor: f64,
    pub trust_score: f64,
    pub grade: ComplianceGrade,
}
