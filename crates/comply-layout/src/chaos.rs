//! Reading-order violation counting.

use comply_core::models::Word;

/// Count words that sit more than `threshold` units above their predecessor
/// in extraction order. The first word is compared against y = 0.
pub fn count_jumps(words: &[Word], threshold: f64) -> usize {
    let mut last_y = 0.0;
    let mut jumps = 0;
    for word in words {
        if word.top < last_y - threshold {
            jumps += 1;
        }
        last_y = word.top;
    }
    jumps
}

/// `jumps / word_count`, 0.0 for an empty page.
pub fn jump_ratio(jumps: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        0.0
    } else {
        jumps as f64 / word_count as f64
    }
}
