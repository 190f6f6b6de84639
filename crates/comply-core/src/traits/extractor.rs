use std::path::Path;

use crate::errors::ExtractionError;
use crate::models::Page;

/// Word/text extraction from a binary document. Decoding is out of scope for
/// the core; implementations wrap whatever parser is available.
pub trait DocumentExtractor: Send + Sync {
    /// Words of every page, in extraction order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>, ExtractionError>;

    /// Plain text of the whole document.
    fn extract_raw_text(&self, path: &Path, layout_aware: bool) -> Result<String, ExtractionError>;
}
