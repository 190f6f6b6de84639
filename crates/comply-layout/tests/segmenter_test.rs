//! Segmenter behaviour beyond the golden pages.

use comply_core::config::LayoutConfig;
use comply_core::models::{LayoutStrategy, Page, Word};
use comply_layout::LayoutSegmenter;

fn word(text: &str, x0: f64, top: f64) -> Word {
    Word::new(text, x0, x0 + 30.0, top, top + 10.0)
}

fn page(words: Vec<Word>) -> Page {
    Page {
        width: 600.0,
        height: 800.0,
        words,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Strategy selection
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn narrow_gutter_falls_back_to_single_column() {
    // Both halves populated, but word starts are packed tightly so no gap
    // inside the band reaches 10 units.
    let mut words = Vec::new();
    for (i, x) in (0..12).map(|i| (i, 240.0 + i as f64 * 8.0)) {
        words.push(word(&format!("w{i}"), x, 100.0));
    }
    let layout = LayoutSegmenter::default().segment_page(&page(words));
    assert_eq!(layout.strategy, LayoutStrategy::SingleColumn);
    assert_eq!(layout.confidence, 1.0);
}

#[test]
fn narrow_but_valid_gutter_is_penalized() {
    // Gutter of 30 units on a 600-wide page: ideal is 60, so half the
    // sidebar penalty weight applies.
    let words = vec![
        word("a", 270.0, 100.0),
        word("d", 300.5, 100.0),
        word("b", 270.0, 120.0),
        word("e", 300.5, 120.0),
        word("c", 270.0, 140.0),
        word("f", 300.5, 140.0),
    ];
    let layout = LayoutSegmenter::default().segment_page(&page(words));
    assert_eq!(layout.strategy, LayoutStrategy::Sidebar);
    assert!((layout.confidence - (1.0 - 0.1 * (60.0 - 30.5) / 60.0)).abs() < 1e-9);
}

#[test]
fn one_sided_page_is_single_column() {
    let words = vec![word("Name", 70.0, 100.0), word("Adresse", 70.0, 120.0)];
    let layout = LayoutSegmenter::default().segment_page(&page(words));
    assert_eq!(layout.strategy, LayoutStrategy::SingleColumn);
    assert_eq!(layout.content, "Name\nAdresse");
}

#[test]
fn jumps_below_chaos_ratio_only_cost_jump_penalty() {
    // 1 jump in 20 words: ratio 0.05, not chaotic.
    let mut words: Vec<Word> = (0..19).map(|i| word("x", 70.0, 100.0 + i as f64 * 20.0)).collect();
    words.push(word("y", 70.0, 50.0));
    let layout = LayoutSegmenter::default().segment_page(&page(words));
    assert_eq!(layout.strategy, LayoutStrategy::SingleColumn);
    assert_eq!(layout.jumps, 1);
    assert!((layout.confidence - 0.95).abs() < 1e-9);
}

#[test]
fn config_thresholds_are_honoured() {
    let words = vec![
        word("a", 70.0, 100.0),
        word("b", 70.0, 300.0),
        word("c", 70.0, 120.0),
        word("d", 70.0, 320.0),
    ];
    let lenient = LayoutSegmenter::new(LayoutConfig {
        chaos_ratio: Some(0.9),
        ..Default::default()
    });
    assert_eq!(
        lenient.segment_page(&page(words.clone())).strategy,
        LayoutStrategy::SingleColumn
    );
    assert_eq!(
        LayoutSegmenter::default().segment_page(&page(words)).strategy,
        LayoutStrategy::Chaotic
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Document level
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn document_joins_pages_and_averages_confidence() {
    let p1 = page(vec![word("LEBENSLAUF", 70.0, 100.0)]);
    let p2 = page(vec![]);
    let p3 = page(vec![
        word("a", 70.0, 100.0),
        word("b", 70.0, 300.0),
        word("c", 70.0, 120.0),
        word("d", 70.0, 320.0),
    ]);
    let doc = LayoutSegmenter::default().segment_document(&[p1, p2, p3]);
    assert_eq!(doc.pages.len(), 3);
    assert_eq!(doc.content, "Lebenslauf\na\nc\nb\nd");
    let expected = (1.0 + 1.0 + doc.pages[2].confidence) / 3.0;
    assert!((doc.confidence - expected).abs() < 1e-12);
}

#[test]
fn document_without_pages_has_no_confidence() {
    let doc = LayoutSegmenter::default().segment_document(&[]);
    assert_eq!(doc.content, "");
    assert_eq!(doc.confidence, 0.0);
}

#[test]
fn titlecase_can_be_disabled() {
    let segmenter = LayoutSegmenter::new(LayoutConfig {
        titlecase_shouting: Some(false),
        ..Default::default()
    });
    let doc = segmenter.segment_document(&[page(vec![word("LEBENSLAUF", 70.0, 100.0)])]);
    assert_eq!(doc.content, "LEBENSLAUF");
}
