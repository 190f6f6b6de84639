//! Line reconstruction by vertical binning.

use comply_core::models::Word;

/// Rebuild text lines from words.
///
/// Words are sorted by `(top, x0)`; a word joins the current line while its
/// `top` is within `tolerance` of the line's first word. Words in a line are
/// joined with single spaces and lines with `\n`. Stable for equal keys.
pub fn reconstruct_lines(words: &[&Word], tolerance: f64) -> String {
    let mut sorted: Vec<&Word> = words.to_vec();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

    let Some((first, rest)) = sorted.split_first() else {
        return String::new();
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = vec![first.text.as_str()];
    let mut anchor = first.top;

    for word in rest {
        if (word.top - anchor).abs() < tolerance {
            current.push(&word.text);
        } else {
            lines.push(current.join(" "));
            current = vec![word.text.as_str()];
            anchor = word.top;
        }
    }
    lines.push(current.join(" "));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_words_within_tolerance() {
        let words = [
            Word::new("Max", 10.0, 30.0, 100.0, 110.0),
            Word::new("Mustermann", 35.0, 90.0, 101.5, 111.5),
            Word::new("Berlin", 10.0, 40.0, 120.0, 130.0),
        ];
        let refs: Vec<&Word> = words.iter().collect();
        assert_eq!(reconstruct_lines(&refs, 4.0), "Max Mustermann\nBerlin");
    }

    #[test]
    fn anchor_does_not_drift() {
        // Each word is 3 units below the previous one; the third is 6 below
        // the anchor and starts a new line.
        let words = [
            Word::new("a", 0.0, 5.0, 10.0, 15.0),
            Word::new("b", 10.0, 15.0, 13.0, 18.0),
            Word::new("c", 20.0, 25.0, 16.0, 21.0),
        ];
        let refs: Vec<&Word> = words.iter().collect();
        assert_eq!(reconstruct_lines(&refs, 4.0), "a b\nc");
    }

    #[test]
    fn extraction_order_is_irrelevant() {
        let words = [
            Word::new("second", 50.0, 90.0, 10.0, 20.0),
            Word::new("first", 0.0, 40.0, 10.0, 20.0),
        ];
        let refs: Vec<&Word> = words.iter().collect();
        assert_eq!(reconstruct_lines(&refs, 4.0), "first second");
    }

    #[test]
    fn empty_input_gives_empty_text() {
        assert_eq!(reconstruct_lines(&[], 4.0), "");
    }
}
