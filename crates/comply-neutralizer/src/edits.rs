//! Spans of the working text that were produced by a rewrite.

use std::ops::Range;

/// Rewritten regions, kept in current-text coordinates as rewrites shift the
/// text around them.
#[derive(Debug, Clone, Default)]
pub struct EditMap {
    spans: Vec<Range<usize>>,
}

impl EditMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `start..old_end` was replaced by `new_len` bytes.
    pub fn record(&mut self, start: usize, old_end: usize, new_len: usize) {
        let new_end = start + new_len;
        let delta = new_len as isize - (old_end - start) as isize;

        let mut merged = start..new_end;
        let mut kept = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            if span.end <= start {
                kept.push(span);
            } else if span.start >= old_end {
                kept.push(shift(span.start, delta)..shift(span.end, delta));
            } else {
                // Overlaps the replaced region: absorb it.
                merged.start = merged.start.min(span.start);
                merged.end = merged.end.max(shift(span.end, delta).max(new_end));
            }
        }
        kept.push(merged);
        kept.sort_by_key(|s| s.start);
        self.spans = kept;
    }

    /// True if `start..end` overlaps any rewritten span.
    pub fn touches(&self, start: usize, end: usize) -> bool {
        self.spans.iter().any(|s| start < s.end && s.start < end)
    }

    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

fn shift(pos: usize, delta: isize) -> usize {
    pos.saturating_add_signed(delta)
}
