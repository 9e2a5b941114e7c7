//! Vocabulary list and store types

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ratatui::style::Color;

use super::error::VocabError;
use super::loader::{self, ParsedVocabulary};

/// Display colors assigned to lists in load order
pub const PALETTE: [Color; 5] = [
    Color::Rgb(46, 125, 50),  // #2e7d32
    Color::Rgb(21, 101, 192), // #1565c0
    Color::Rgb(106, 27, 154), // #6a1b9a
    Color::Rgb(239, 108, 0),  // #ef6c00
    Color::Rgb(173, 20, 87),  // #ad1457
];

/// A named, colored collection of words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyList {
    name: String,
    words: Vec<String>,
    tones: BTreeMap<String, String>,
    color: Color,
}

impl VocabularyList {
    /// Build a list from its parts
    pub fn new(
        name: impl Into<String>,
        words: Vec<String>,
        tones: BTreeMap<String, String>,
        color: Color,
    ) -> Self {
        Self { name: name.into(), words, tones, color }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Words in file order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Tone label per word
    pub fn tones(&self) -> &BTreeMap<String, String> {
        &self.tones
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Outcome of loading a batch of files
///
/// A bad file never stops the remaining files from loading.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of the lists that were added
    pub loaded: Vec<String>,
    /// Files that were rejected, with the reason
    pub failures: Vec<(PathBuf, VocabError)>,
}

impl LoadReport {
    /// One-line description for the status bar
    pub fn message(&self) -> String {
        let mut parts = Vec::new();
        if !self.loaded.is_empty() {
            parts.push(format!("Loaded {}", self.loaded.join(", ")));
        }
        for (path, err) in &self.failures {
            parts.push(format!("Failed to load {}: {}", path.display(), err));
        }
        if parts.is_empty() { "No files selected".to_string() } else { parts.join("; ") }
    }
}

/// All loaded vocabulary, in load order
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    lists: Vec<VocabularyList>,
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file, collecting per-file failures
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> LoadReport {
        let mut report = LoadReport::default();
        for path in paths {
            let path = path.as_ref();
            match loader::read_path(path) {
                Ok(parsed) => {
                    let stem = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "vocabulary".to_string());
                    let name = self.push(stem, parsed);
                    tracing::info!(list = %name, path = %path.display(), "Loaded vocabulary list");
                    report.loaded.push(name);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Rejected vocabulary file");
                    report.failures.push((path.to_path_buf(), err));
                }
            }
        }
        report
    }

    /// Add parsed vocabulary as a new list, returning the name it was given
    pub fn push(&mut self, name: impl Into<String>, parsed: ParsedVocabulary) -> String {
        let name = self.unique_name(name.into());
        let color = PALETTE[self.lists.len() % PALETTE.len()];
        self.lists.push(VocabularyList::new(name.clone(), parsed.words, parsed.tones, color));
        name
    }

    /// Drop every list
    pub fn clear(&mut self) {
        self.lists.clear();
    }

    pub fn lists(&self) -> &[VocabularyList] {
        &self.lists
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Every word of every list, lists in load order
    pub fn all_words(&self) -> Vec<String> {
        self.lists.iter().flat_map(|list| list.words.iter().cloned()).collect()
    }

    /// Every (word, tone) pair across lists
    pub fn tone_entries(&self) -> Vec<(&str, &str)> {
        self.lists
            .iter()
            .flat_map(|list| list.tones.iter().map(|(w, t)| (w.as_str(), t.as_str())))
            .collect()
    }

    /// Header summary, e.g. `Loaded: hsk1 (150), hsk2 (150)`
    pub fn summary(&self) -> String {
        if self.lists.is_empty() {
            return "No vocabulary lists loaded".to_string();
        }
        let parts: Vec<String> =
            self.lists.iter().map(|l| format!("{} ({})", l.name, l.words.len())).collect();
        format!("Loaded: {}", parts.join(", "))
    }

    fn unique_name(&self, base: String) -> String {
        let taken = |name: &str| self.lists.iter().any(|l| l.name == name);
        if !taken(&base) {
            return base;
        }
        (2..).map(|n| format!("{base} ({n})")).find(|name| !taken(name)).unwrap_or(base)
    }
}
