//! # comply-layout
//!
//! Turns extracted page words into ordered text with a layout confidence,
//! then normalizes the document text every later stage operates on.

pub mod chaos;
pub mod confidence;
pub mod lines;
pub mod normalize;
pub mod segmenter;
pub mod sidebar;

pub use normalize::normalize_text;
pub use segmenter::LayoutSegmenter;
