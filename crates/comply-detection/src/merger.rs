//! Greedy interval scheduling over hits from every source.

use comply_core::errors::DetectionError;
use comply_core::models::{ConflictResolution, Hit, HitSet, ResolvedHitSet};

/// Merger output: the accepted hits and one record per rejected hit.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub resolved: ResolvedHitSet,
    pub conflicts: Vec<ConflictResolution>,
}

/// Resolve `hits` into a non-overlapping set over `text`.
///
/// Hits are ordered by start, longer first on equal starts (stable, so
/// insertion order breaks exact ties). A hit is accepted iff it starts at or
/// after the end of the last accepted hit. Everything else is rejected,
/// including partial overlaps that extend further right; no spans are
/// combined.
///
/// Fails with `CoordinateMismatch` if `hits` was computed over another text.
pub fn merge(text: &str, hits: HitSet) -> Result<MergeOutcome, DetectionError> {
    hits.verify_against(text)?;

    let mut sorted = hits.into_hits();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));

    let mut accepted: Vec<Hit> = Vec::with_capacity(sorted.len());
    let mut conflicts = Vec::new();

    for hit in sorted {
        match accepted.last() {
            Some(last) if hit.start < last.end => {
                comply_core::tracing_setup::events::merge_conflict(
                    &hit.label,
                    hit.source.as_str(),
                    hit.start,
                    hit.end,
                    &last.label,
                );
                conflicts.push(ConflictResolution {
                    winner_start: last.start,
                    winner_end: last.end,
                    winner_label: last.label.clone(),
                    loser: hit,
                });
            }
            _ => accepted.push(hit),
        }
    }

    let resolved = ResolvedHitSet::try_new(text, accepted)?;
    Ok(MergeOutcome {
        resolved,
        conflicts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use comply_core::models::HitSource;

    fn hit(start: usize, end: usize, label: &str) -> Hit {
        Hit::new(start, end, label, HitSource::Recognizer, 0.9)
    }

    const TEXT: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

    #[test]
    fn contained_hit_is_rejected() {
        let set = HitSet::with_hits(TEXT, vec![hit(10, 20, "PER"), hit(15, 18, "LOC")]);
        let out = merge(TEXT, set).unwrap();
        assert_eq!(out.resolved.len(), 1);
        assert_eq!(out.resolved.hits()[0].label, "PER");
        assert_eq!(out.conflicts.len(), 1);
        assert_eq!(out.conflicts[0].loser.label, "LOC");
        assert_eq!((out.conflicts[0].winner_start, out.conflicts[0].winner_end), (10, 20));
    }

    #[test]
    fn longer_hit_wins_at_same_start() {
        let set = HitSet::with_hits(TEXT, vec![hit(5, 7, "SHORT"), hit(5, 12, "LONG")]);
        let out = merge(TEXT, set).unwrap();
        assert_eq!(out.resolved.hits()[0].label, "LONG");
    }

    #[test]
    fn partial_overlap_extending_right_is_rejected() {
        let set = HitSet::with_hits(TEXT, vec![hit(0, 5, "A"), hit(3, 30, "B")]);
        let out = merge(TEXT, set).unwrap();
        assert_eq!(out.resolved.len(), 1);
        assert_eq!(out.resolved.hits()[0].label, "A");
    }

    #[test]
    fn adjacent_hits_both_survive() {
        let set = HitSet::with_hits(TEXT, vec![hit(5, 10, "B"), hit(0, 5, "A")]);
        let out = merge(TEXT, set).unwrap();
        assert_eq!(out.resolved.len(), 2);
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn foreign_text_is_a_coordinate_mismatch() {
        let set = HitSet::with_hits("other text", vec![hit(0, 5, "A")]);
        let err = merge(TEXT, set).unwrap_err();
        assert!(matches!(err, DetectionError::CoordinateMismatch { .. }));
    }

    #[test]
    fn out_of_bounds_hit_is_rejected() {
        let set = HitSet::with_hits(TEXT, vec![hit(30, 99, "A")]);
        assert!(matches!(
            merge(TEXT, set).unwrap_err(),
            DetectionError::SpanOutOfBounds { .. }
        ));
    }

    #[test]
    fn empty_set_merges_to_empty() {
        let out = merge(TEXT, HitSet::new(TEXT)).unwrap();
        assert!(out.resolved.is_empty());
        assert!(out.conflicts.is_empty());
    }
}
