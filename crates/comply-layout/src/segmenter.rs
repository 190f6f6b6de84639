//! Page and document segmentation.

use comply_core::config::LayoutConfig;
use comply_core::models::{DocumentLayout, LayoutStrategy, Page, PageLayout, Word};

use crate::chaos::{count_jumps, jump_ratio};
use crate::confidence;
use crate::lines::reconstruct_lines;
use crate::normalize::normalize_text;
use crate::sidebar::{find_gutter, half_counts, render_columns};

/// Chooses a reconstruction strategy per page and scores it.
#[derive(Debug, Clone, Default)]
pub struct LayoutSegmenter {
    config: LayoutConfig,
}

impl LayoutSegmenter {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Segment one page. First matching strategy wins:
    /// empty, chaotic, sidebar, single column.
    pub fn segment_page(&self, page: &Page) -> PageLayout {
        let words = &page.words;
        if words.is_empty() {
            return PageLayout {
                content: String::new(),
                confidence: 1.0,
                strategy: LayoutStrategy::Empty,
                jumps: 0,
            };
        }

        let cfg = &self.config;
        let jumps = count_jumps(words, cfg.effective_jump_threshold());
        let ratio = jump_ratio(jumps, words.len());
        let mut penalties = confidence::jump_penalty(ratio, cfg);

        let (strategy, content) = if ratio > cfg.effective_chaos_ratio() {
            penalties += cfg.effective_chaotic_penalty();
            (LayoutStrategy::Chaotic, self.single_block(words))
        } else if self.has_two_populated_halves(words, page.width) {
            match find_gutter(words, page.width, cfg.effective_gutter_band()) {
                Some(gutter) if gutter.width >= cfg.effective_min_gutter_width() => {
                    penalties += confidence::sidebar_penalty(gutter.width, page.width, cfg);
                    (
                        LayoutStrategy::Sidebar,
                        render_columns(words, &gutter, cfg.effective_line_tolerance()),
                    )
                }
                _ => (LayoutStrategy::SingleColumn, self.single_block(words)),
            }
        } else {
            (LayoutStrategy::SingleColumn, self.single_block(words))
        };

        let confidence = confidence::finalize(penalties, cfg);
        tracing::debug!(
            strategy = %strategy,
            jumps = jumps,
            words = words.len(),
            confidence = confidence,
            "page segmented"
        );

        PageLayout {
            content,
            confidence,
            strategy,
            jumps,
        }
    }

    /// Segment every page, join the contents with newlines, and normalize.
    /// Document confidence is the mean page confidence; 0.0 with no pages.
    pub fn segment_document(&self, pages: &[Page]) -> DocumentLayout {
        let page_layouts: Vec<PageLayout> = pages.iter().map(|p| self.segment_page(p)).collect();

        let joined = page_layouts
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let content = normalize_text(&joined, self.config.effective_titlecase_shouting());

        let confidence = if page_layouts.is_empty() {
            0.0
        } else {
            page_layouts.iter().map(|p| p.confidence).sum::<f64>() / page_layouts.len() as f64
        };

        DocumentLayout {
            content,
            confidence,
            pages: page_layouts,
        }
    }

    fn has_two_populated_halves(&self, words: &[Word], page_width: f64) -> bool {
        let (left, right) = half_counts(words, page_width);
        let min = words.len() as f64 * self.config.effective_column_share();
        left as f64 > min && right as f64 > min
    }

    fn single_block(&self, words: &[Word]) -> String {
        let refs: Vec<&Word> = words.iter().collect();
        reconstruct_lines(&refs, self.config.effective_line_tolerance())
    }
}
