//! Vocabulary highlighting over free-form text
//!
//! Every occurrence of every known word becomes a [`HighlightSpan`]. Longer
//! words are matched first, and a match that sits entirely inside a span that
//! is already claimed is dropped, so `学习` is never fragmented by `习`.
//! Spans that only partially overlap are both kept.

use crate::vocab::VocabularyStore;

/// A region of the text matched to a vocabulary word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HighlightSpan {
    /// Byte offset of the first matched byte
    pub start: usize,
    /// Byte offset one past the match
    pub end: usize,
    /// Position of the owning list in the store
    pub list_index: usize,
    /// Name of the owning list
    pub list_name: String,
    /// The word that matched
    pub word: String,
}

impl HighlightSpan {
    /// Whether this span covers `other` completely
    fn contains(&self, start: usize, end: usize) -> bool {
        self.start <= start && end <= self.end
    }
}

/// Compute highlight spans for `text`
///
/// The result is sorted by start offset, longer spans first on ties.
pub fn highlight(text: &str, store: &VocabularyStore) -> Vec<HighlightSpan> {
    // (char length, list index, word index, word)
    let mut candidates: Vec<(usize, usize, usize, &str)> = store
        .lists()
        .iter()
        .enumerate()
        .flat_map(|(list_index, list)| {
            list.words()
                .iter()
                .enumerate()
                .filter(|(_, word)| !word.is_empty())
                .map(move |(word_index, word)| {
                    (word.chars().count(), list_index, word_index, word.as_str())
                })
        })
        .collect();

    // Stable: equal lengths keep list order, then word order
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    let mut spans: Vec<HighlightSpan> = Vec::new();
    for (_, list_index, _, word) in candidates {
        let list_name = store.lists()[list_index].name();
        let mut cursor = 0;
        while let Some(offset) = text[cursor..].find(word) {
            let start = cursor + offset;
            let end = start + word.len();
            cursor = end;

            if spans.iter().any(|span| span.contains(start, end)) {
                continue;
            }
            spans.push(HighlightSpan {
                start,
                end,
                list_index,
                list_name: list_name.to_string(),
                word: word.to_string(),
            });
        }
    }

    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    tracing::debug!(spans = spans.len(), "Highlighted text");
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::loader::ParsedVocabulary;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn store(lists: &[(&str, &[&str])]) -> VocabularyStore {
        let mut store = VocabularyStore::new();
        for (name, words) in lists {
            store.push(
                *name,
                ParsedVocabulary {
                    words: words.iter().map(|w| w.to_string()).collect(),
                    ..Default::default()
                },
            );
        }
        store
    }

    fn matched<'a>(text: &'a str, spans: &[HighlightSpan]) -> Vec<(&'a str, String)> {
        spans.iter().map(|s| (&text[s.start..s.end], s.list_name.clone())).collect()
    }

    #[test]
    fn empty_store_yields_nothing() {
        assert!(highlight("我在学习中文", &VocabularyStore::new()).is_empty());
    }

    #[test]
    fn longer_word_wins_across_lists() {
        let store = store(&[("A", &["学习"]), ("B", &["习"])]);
        let text = "我在学习中文";
        let spans = highlight(text, &store);

        assert_eq!(spans.len(), 1);
        assert_eq!(matched(text, &spans), vec![("学习", "A".to_string())]);
        assert_eq!(spans[0].start, "我在".len());
        assert_eq!(spans[0].end, "我在学习".len());
    }

    #[test]
    fn longer_word_wins_within_a_list() {
        let store = store(&[("A", &["习", "学习"])]);
        let text = "学习习";
        let spans = highlight(text, &store);
        assert_eq!(matched(text, &spans), vec![("学习", "A".into()), ("习", "A".into())]);
    }

    #[test]
    fn every_occurrence_is_found() {
        let store = store(&[("A", &["你好"])]);
        let text = "你好，你好！你好";
        assert_eq!(highlight(text, &store).len(), 3);
    }

    #[test]
    fn repeated_word_matches_do_not_overlap() {
        let store = store(&[("A", &["哈哈"])]);
        let text = "哈哈哈";
        let spans = highlight(text, &store);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 0);
    }

    #[test]
    fn partial_overlaps_are_kept() {
        let store = store(&[("A", &["学习"]), ("B", &["习中"])]);
        let text = "我在学习中文";
        let spans = highlight(text, &store);
        assert_eq!(matched(text, &spans), vec![("学习", "A".into()), ("习中", "B".into())]);
    }

    #[test]
    fn no_normalization_is_applied() {
        let store = store(&[("A", &["Hello"])]);
        assert!(highlight("hello HELLO", &store).is_empty());
    }

    #[test]
    fn same_word_in_two_lists_goes_to_first_list() {
        let store = store(&[("A", &["中文"]), ("B", &["中文"])]);
        let text = "中文";
        assert_eq!(matched(text, &highlight(text, &store)), vec![("中文", "A".into())]);
    }

    proptest! {
        #[test]
        fn spans_stay_in_bounds_and_match_the_word(
            text in "[学习中文我在你好 ab]{0,24}",
            words in proptest::collection::vec("[学习中文你好ab]{1,3}", 0..6),
        ) {
            let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let store = store(&[("A", &word_refs[..word_refs.len() / 2]), ("B", &word_refs[word_refs.len() / 2..])]);
            for span in highlight(&text, &store) {
                prop_assert!(span.start < span.end);
                prop_assert!(span.end <= text.len());
                prop_assert_eq!(&text[span.start..span.end], span.word.as_str());
            }
        }

        #[test]
        fn highlighting_is_idempotent(
            text in "[学习中文我在你好]{0,24}",
            words in proptest::collection::vec("[学习中文你好]{1,3}", 0..6),
        ) {
            let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let store = store(&[("A", &word_refs)]);
            prop_assert_eq!(highlight(&text, &store), highlight(&text, &store));
        }
    }
}
