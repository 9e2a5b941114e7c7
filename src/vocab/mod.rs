//! Vocabulary lists loaded from CSV files

pub mod error;
pub mod loader;
pub mod model;

pub use error::VocabError;
pub use model::{LoadReport, PALETTE, VocabularyList, VocabularyStore};
