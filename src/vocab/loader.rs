//! CSV parsing for vocabulary files
//!
//! A vocabulary file has a header row. The word column is the first header
//! named `word`, `vocab` or `character` (any case), falling back to the first
//! column. The tone column is optional and named `tone` or `tones`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::VocabError;

/// Header names accepted for the word column, in priority order
const WORD_HEADERS: &[&str] = &["word", "vocab", "character"];
/// Header names accepted for the tone column, in priority order
const TONE_HEADERS: &[&str] = &["tone", "tones"];

/// Words and tones read from one CSV source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedVocabulary {
    /// Words in row order, duplicates kept
    pub words: Vec<String>,
    /// Tone label per word, for rows that had one
    pub tones: BTreeMap<String, String>,
}

/// Parse a vocabulary file from disk
pub fn read_path(path: &Path) -> Result<ParsedVocabulary, VocabError> {
    let file =
        File::open(path).map_err(|source| VocabError::Io { path: path.to_path_buf(), source })?;
    read_from(file)
}

/// Parse vocabulary from any CSV source
pub fn read_from<R: Read>(source: R) -> Result<ParsedVocabulary, VocabError> {
    let mut reader =
        ReaderBuilder::new().has_headers(true).flexible(true).trim(Trim::All).from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(VocabError::format("CSV must include headers"));
    }

    let word_column = match_column(&headers, WORD_HEADERS).unwrap_or(0);
    let tone_column = match_column(&headers, TONE_HEADERS);

    let mut parsed = ParsedVocabulary::default();
    for record in reader.records() {
        let record = record?;
        let word = record.get(word_column).unwrap_or("").trim();
        if word.is_empty() {
            continue;
        }
        parsed.words.push(word.to_string());

        if let Some(tone) = tone_column.and_then(|column| record.get(column)) {
            let tone = tone.trim();
            if !tone.is_empty() {
                parsed.tones.insert(word.to_string(), tone.to_string());
            }
        }
    }

    if parsed.words.is_empty() {
        return Err(VocabError::format("No words found in CSV"));
    }

    tracing::debug!(
        words = parsed.words.len(),
        tones = parsed.tones.len(),
        "Parsed vocabulary CSV"
    );
    Ok(parsed)
}

/// Find the first header matching one of the candidates (case-insensitive)
fn match_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    let lowered: Vec<String> =
        headers.iter().map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase()).collect();
    candidates.iter().find_map(|candidate| lowered.iter().position(|h| h == candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Result<ParsedVocabulary, VocabError> {
        read_from(input.as_bytes())
    }

    #[test]
    fn reads_word_and_tone_columns() {
        let parsed = parse("word,tone\n你好,3\n谢谢,4\n").unwrap();
        assert_eq!(parsed.words, vec!["你好", "谢谢"]);
        assert_eq!(parsed.tones.get("你好").map(String::as_str), Some("3"));
        assert_eq!(parsed.tones.get("谢谢").map(String::as_str), Some("4"));
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let parsed = parse("Pinyin,Character,TONES\nni3,你,3\n").unwrap();
        assert_eq!(parsed.words, vec!["你"]);
        assert_eq!(parsed.tones.get("你").map(String::as_str), Some("3"));
    }

    #[test]
    fn word_header_priority_follows_candidate_order() {
        let parsed = parse("character,vocab\n字,词\n").unwrap();
        assert_eq!(parsed.words, vec!["词"]);
    }

    #[test]
    fn falls_back_to_first_column() {
        let parsed = parse("hanzi,meaning\n学习,study\n").unwrap();
        assert_eq!(parsed.words, vec!["学习"]);
        assert!(parsed.tones.is_empty());
    }

    #[test]
    fn missing_tone_column_means_no_tones() {
        let parsed = parse("word,meaning\n学习,study\n").unwrap();
        assert!(parsed.tones.is_empty());
    }

    #[test]
    fn skips_blank_words_and_trims_values() {
        let parsed = parse("word,tone\n  中文 , 1 \n,2\n   ,3\n汉字,\n").unwrap();
        assert_eq!(parsed.words, vec!["中文", "汉字"]);
        assert_eq!(parsed.tones.len(), 1);
        assert_eq!(parsed.tones.get("中文").map(String::as_str), Some("1"));
    }

    #[test]
    fn duplicates_are_kept_and_last_tone_wins() {
        let parsed = parse("word,tone\n好,3\n好,4\n").unwrap();
        assert_eq!(parsed.words, vec!["好", "好"]);
        assert_eq!(parsed.tones.get("好").map(String::as_str), Some("4"));
    }

    #[test]
    fn short_rows_are_tolerated() {
        let parsed = parse("word,tone\n你\n我,3\n").unwrap();
        assert_eq!(parsed.words, vec!["你", "我"]);
        assert_eq!(parsed.tones.len(), 1);
    }

    #[test]
    fn header_only_file_is_rejected() {
        let err = parse("word,tone\n").unwrap_err();
        assert!(matches!(err, VocabError::CsvFormat { .. }));
        assert_eq!(err.to_string(), "No words found in CSV");
    }

    #[test]
    fn empty_file_is_rejected() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, VocabError::CsvFormat { .. }));
    }

    #[test]
    fn byte_order_mark_does_not_hide_header() {
        let parsed = parse("\u{feff}tone,word\n2,学\n").unwrap();
        assert_eq!(parsed.words, vec!["学"]);
        assert_eq!(parsed.tones.get("学").map(String::as_str), Some("2"));
    }
}
