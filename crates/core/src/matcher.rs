//! Positional substance matching and highlight spans.
//!
//! Matching runs on an ASCII-lowercased copy of the text. Taxonomy names are ASCII, so byte
//! offsets found in the copy are valid offsets into the original text and every returned term
//! is the original-case substring.

use crate::taxonomy::{SubstanceCategory, Taxonomy};
use serde::{Deserialize, Serialize};

/// One occurrence of a taxonomy substance in a piece of text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedMatch {
    /// The matched text in its original case.
    pub term: String,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
    pub category: SubstanceCategory,
}

/// A run of text, styled when it belongs to a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub category: Option<SubstanceCategory>,
}

/// Text split into plain and highlighted spans, in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub spans: Vec<Span>,
}

impl AnnotatedText {
    /// Concatenation of every span.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Spans that carry a category.
    pub fn highlighted(&self) -> impl Iterator<Item = &Span> + '_ {
        self.spans.iter().filter(|s| s.category.is_some())
    }

    fn push(&mut self, text: &str, category: Option<SubstanceCategory>) {
        if !text.is_empty() {
            self.spans.push(Span {
                text: text.to_owned(),
                category,
            });
        }
    }
}

/// Find every occurrence of every taxonomy marker in `text`.
///
/// Each substance is searched independently and the search restarts one byte after each found
/// start, so overlapping occurrences (including overlaps between different substances and
/// categories) are all reported. The result is stably sorted by `start`.
pub fn find_matches(taxonomy: &Taxonomy, text: &str) -> Vec<HighlightedMatch> {
    let lower = text.to_ascii_lowercase();
    let mut matches = Vec::new();

    for entry in taxonomy.markers() {
        let needle = entry.name.as_str();
        let mut from = 0;
        while let Some(idx) = lower.get(from..).and_then(|rest| rest.find(needle)) {
            let start = from + idx;
            let end = start + needle.len();
            matches.push(HighlightedMatch {
                term: text[start..end].to_owned(),
                start,
                end,
                category: entry.category,
            });
            from = start + 1;
        }
    }

    matches.sort_by_key(|m| m.start);
    tracing::trace!(matches = matches.len(), "substance markers matched");
    matches
}

/// Split `text` into spans, styling the regions covered by `matches`.
///
/// Matches are walked in ascending `start` order. Gaps become plain spans and text after the
/// last match is emitted plain. Overlaps are clipped: a match starting inside an already styled
/// region only contributes its uncovered tail, and a fully covered match contributes nothing.
/// Matches whose range is not a valid slice of `text` are skipped. The spans always concatenate
/// back to `text`.
pub fn highlight_text(text: &str, matches: &[HighlightedMatch]) -> AnnotatedText {
    let mut ordered: Vec<&HighlightedMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| m.start);

    let mut annotated = AnnotatedText::default();
    let mut cursor = 0;

    for m in ordered {
        if m.end <= cursor || text.get(m.start..m.end).is_none() {
            continue;
        }
        let from = m.start.max(cursor);
        annotated.push(&text[cursor..from], None);
        annotated.push(&text[from..m.end], Some(m.category));
        cursor = m.end;
    }

    annotated.push(&text[cursor..], None);
    annotated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> &'static Taxonomy {
        Taxonomy::bundled()
    }

    #[test]
    fn finds_original_case_terms_with_offsets() {
        let text = "Water, ASPARTAME, Red 40";
        let matches = find_matches(bundled(), text);

        let aspartame = matches.iter().find(|m| m.term == "ASPARTAME").unwrap();
        assert_eq!(aspartame.category, SubstanceCategory::ArtificialSweetener);
        assert_eq!(&text[aspartame.start..aspartame.end], "ASPARTAME");

        let red = matches.iter().find(|m| m.term == "Red 40").unwrap();
        assert_eq!(red.category, SubstanceCategory::ConcerningAdditive);
    }

    #[test]
    fn matches_are_sorted_by_start() {
        let text = "MSG, lead, BHT, sodium benzoate, formaldehyde, monosodium glutamate";
        let matches = find_matches(bundled(), text);
        assert!(!matches.is_empty());
        assert!(matches.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn overlapping_matches_are_all_retained() {
        // "methylmercury" also contains "mercury".
        let matches = find_matches(bundled(), "Methylmercury");
        let terms: Vec<&str> = matches.iter().map(|m| m.term.as_str()).collect();
        assert_eq!(terms, vec!["Methylmercury", "mercury"]);

        let repeated = find_matches(bundled(), "lead lead");
        assert_eq!(repeated.len(), 2);
        assert_eq!(repeated[1].start, 5);
    }

    #[test]
    fn no_matches_for_clean_text() {
        assert!(find_matches(bundled(), "Water, Salt, Oats").is_empty());
        assert!(find_matches(bundled(), "").is_empty());
    }

    #[test]
    fn non_ascii_text_keeps_offsets_valid() {
        let text = "Crème brûlée with ÄSPARTAME-free aspartame";
        let matches = find_matches(bundled(), text);
        assert_eq!(matches.len(), 1);
        assert_eq!(&text[matches[0].start..matches[0].end], "aspartame");
    }

    #[test]
    fn highlight_emits_gaps_matches_and_tail() {
        let text = "Water, BHA and salt";
        let matches = find_matches(bundled(), text);
        let annotated = highlight_text(text, &matches);

        assert_eq!(annotated.plain_text(), text);
        assert_eq!(
            annotated.spans,
            vec![
                Span {
                    text: "Water, ".into(),
                    category: None
                },
                Span {
                    text: "BHA".into(),
                    category: Some(SubstanceCategory::Preservative)
                },
                Span {
                    text: " and salt".into(),
                    category: None
                },
            ]
        );
    }

    #[test]
    fn highlight_clips_overlapping_matches() {
        let text = "methylmercury!";
        let matches = find_matches(bundled(), text);
        let annotated = highlight_text(text, &matches);

        assert_eq!(annotated.plain_text(), text);
        assert_eq!(annotated.highlighted().count(), 1);
        assert_eq!(annotated.spans.last().unwrap().text, "!");
    }

    #[test]
    fn highlight_handles_partial_overlap_and_bad_ranges() {
        let text = "abcdef";
        let matches = vec![
            HighlightedMatch {
                term: "abcd".into(),
                start: 0,
                end: 4,
                category: SubstanceCategory::Carcinogen,
            },
            HighlightedMatch {
                term: "cdef".into(),
                start: 2,
                end: 6,
                category: SubstanceCategory::Neurotoxin,
            },
            HighlightedMatch {
                term: "zz".into(),
                start: 5,
                end: 40,
                category: SubstanceCategory::Preservative,
            },
        ];
        let annotated = highlight_text(text, &matches);
        let parts: Vec<(&str, Option<SubstanceCategory>)> = annotated
            .spans
            .iter()
            .map(|s| (s.text.as_str(), s.category))
            .collect();
        assert_eq!(
            parts,
            vec![
                ("abcd", Some(SubstanceCategory::Carcinogen)),
                ("ef", Some(SubstanceCategory::Neurotoxin)),
            ]
        );
    }

    #[test]
    fn highlight_without_matches_is_single_plain_span() {
        let annotated = highlight_text("plain", &[]);
        assert_eq!(annotated.spans.len(), 1);
        assert!(highlight_text("", &[]).spans.is_empty());
    }
}
