//! Study session context
//!
//! Owns everything a study run needs: loaded vocabulary, the sentence
//! generator, the quiz engine, the random source and the last generated
//! batch. The TUI and the CLI both drive the app through this type.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::{self, AudioError};
use crate::config::Config;
use crate::generate::{
    GenerateError, GenerationMode, SentenceBatch, SentenceGenerator, SentenceService, Strategy,
};
use crate::highlight::{self, HighlightSpan};
use crate::llm::{LlmClient, ServiceError};
use crate::quiz::{QuizEngine, QuizError, QuizOutcome, QuizStart, QuizVariant};
use crate::vocab::{LoadReport, VocabularyStore};

/// Session state shared by every panel
#[derive(Debug)]
pub struct StudySession<S = Strategy> {
    store: VocabularyStore,
    generator: SentenceGenerator<S>,
    quiz: QuizEngine,
    rng: StdRng,
    sentences: Vec<String>,
    client: Option<LlmClient>,
}

impl StudySession<Strategy> {
    /// Build a session from configuration, looking up the API key once
    pub fn from_config(config: &Config) -> Self {
        let client = Self::connect(config);
        let strategy = Strategy::from_config(&config.generation, client.clone());
        let mut session =
            Self::with_service(strategy, &config.placeholder_marker, StdRng::from_os_rng());
        session.client = client;
        session
    }

    /// Look up the API key again, e.g. after it was stored
    pub fn refresh_client(&mut self, config: &Config) {
        self.client = Self::connect(config);
        self.generator.set_service(Strategy::from_config(&config.generation, self.client.clone()));
    }

    fn connect(config: &Config) -> Option<LlmClient> {
        match LlmClient::from_config(&config.generation) {
            Ok(client) => Some(client),
            Err(ServiceError::ApiKeyNotFound) => {
                tracing::info!("No API key configured, remote features disabled");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to create service client");
                None
            }
        }
    }

    /// Speak the last generated batch
    pub async fn play_audio(&self) -> Result<PathBuf, AudioError> {
        audio::play_sentences(self.client.as_ref(), &self.sentences).await
    }
}

impl<S: SentenceService> StudySession<S> {
    /// Build a session around any sentence service
    pub fn with_service(service: S, marker: &str, rng: StdRng) -> Self {
        Self {
            store: VocabularyStore::new(),
            generator: SentenceGenerator::new(service, marker),
            quiz: QuizEngine::new(),
            rng,
            sentences: Vec::new(),
            client: None,
        }
    }

    pub fn store(&self) -> &VocabularyStore {
        &self.store
    }

    pub fn generator(&self) -> &SentenceGenerator<S> {
        &self.generator
    }

    pub fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    /// The last generated batch
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Load vocabulary files, appending to the store
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> LoadReport {
        self.store.load_files(paths)
    }

    /// Drop all vocabulary along with anything derived from it
    pub fn clear_vocabulary(&mut self) {
        self.store.clear();
        self.quiz.reset();
        self.sentences.clear();
    }

    pub fn highlight(&self, text: &str) -> Vec<HighlightSpan> {
        highlight::highlight(text, &self.store)
    }

    /// Generate a new batch, replacing the previous one
    pub async fn generate(
        &mut self,
        count: usize,
        templates: &[String],
        mode: GenerationMode,
    ) -> Result<SentenceBatch, GenerateError> {
        let words = self.store.all_words();
        let batch = self.generator.generate(&mut self.rng, count, templates, &words, mode).await?;
        self.sentences = batch.sentences.clone();
        Ok(batch)
    }

    pub async fn new_quiz(&mut self, variant: QuizVariant) -> Result<QuizStart, QuizError> {
        self.quiz.new_quiz(&mut self.rng, &self.store, &self.generator, variant).await
    }

    pub fn check_answer(&self, tone: &str) -> Result<QuizOutcome, QuizError> {
        self.quiz.check_answer(tone)
    }
}
