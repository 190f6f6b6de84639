use serde::{Deserialize, Serialize};

/// Reconstruction strategy chosen for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    Empty,
    Chaotic,
    Sidebar,
    SingleColumn,
}

impl LayoutStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Chaotic => "chaotic",
            Self::Sidebar => "sidebar",
            Self::SingleColumn => "single_column",
        }
    }
}

impl std::fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of segmenting a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub content: String,
    pub confidence: f64,
    pub strategy: LayoutStrategy,
    pub jumps: usize,
}

/// Result of segmenting a whole document.
///
/// `content` is the normalized text every later stage works on; hit offsets
/// are byte offsets into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    pub content: String,
    pub confidence: f64,
    pub pages: Vec<PageLayout>,
}
