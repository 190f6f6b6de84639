//! Two-column (sidebar) detection and rendering.

use comply_core::models::Word;

use crate::lines::reconstruct_lines;

pub const SIDEBAR_HEADER: &str = "-- Sidebar --";
pub const MAIN_HEADER: &str = "-- Main --";

/// Widest gap between consecutive word start positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gutter {
    pub width: f64,
    /// Midpoint of the gap; words with `x0 < split_x` form the left column.
    pub split_x: f64,
}

/// Find the widest gap among `x0` values strictly inside the band
/// `(band·width, (1−band)·width)`. The earliest gap wins ties.
/// `None` when fewer than two positions fall inside the band.
pub fn find_gutter(words: &[Word], page_width: f64, band: f64) -> Option<Gutter> {
    let lo = page_width * band;
    let hi = page_width * (1.0 - band);
    let mut starts: Vec<f64> = words
        .iter()
        .map(|w| w.x0)
        .filter(|x| *x > lo && *x < hi)
        .collect();
    starts.sort_by(f64::total_cmp);

    starts
        .windows(2)
        .map(|pair| Gutter {
            width: pair[1] - pair[0],
            split_x: (pair[0] + pair[1]) / 2.0,
        })
        .fold(None, |best: Option<Gutter>, gap| match best {
            Some(b) if b.width >= gap.width => Some(b),
            _ => Some(gap),
        })
}

/// Count of words left of the page centre and right of it. Words starting
/// exactly on the centre line count for neither side.
pub fn half_counts(words: &[Word], page_width: f64) -> (usize, usize) {
    let mid = page_width * 0.5;
    let left = words.iter().filter(|w| w.x0 < mid).count();
    let right = words.iter().filter(|w| w.x0 > mid).count();
    (left, right)
}

/// Split words at the gutter and render both columns with section headers.
/// The column with fewer words is the sidebar.
pub fn render_columns(words: &[Word], gutter: &Gutter, line_tolerance: f64) -> String {
    let (left, right): (Vec<&Word>, Vec<&Word>) =
        words.iter().partition(|w| w.x0 < gutter.split_x);

    let left_text = reconstruct_lines(&left, line_tolerance);
    let right_text = reconstruct_lines(&right, line_tolerance);

    if left.len() < right.len() {
        format!("{SIDEBAR_HEADER}\n{left_text}\n\n{MAIN_HEADER}\n{right_text}")
    } else {
        format!("{MAIN_HEADER}\n{left_text}\n\n{SIDEBAR_HEADER}\n{right_text}")
    }
}
