//! Practice sentence generation
//!
//! Two modes share one generator:
//!
//! - **Fixed form**: a grammar pattern from [`GRAMMAR_FORMS`] plus up to three
//!   vocabulary words, sent to the configured [`SentenceService`] and rendered
//!   locally when the service is unavailable.
//! - **Placeholder**: a user template line whose marker is replaced by random
//!   vocabulary words.
//!
//! Generation never fails once a vocabulary pool exists.

pub mod forms;
pub mod strategy;

use std::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::ServiceError;
pub use forms::GRAMMAR_FORMS;
pub use strategy::{SentencePrompt, SentenceService, Strategy};

/// Largest batch a single request produces
pub const MAX_SENTENCES: usize = 20;
/// Words sampled per fixed-form sentence
const WORDS_PER_SENTENCE: usize = 3;

/// Missing user input that stops generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Load vocabulary lists first.")]
    MissingVocabulary,

    #[error("Enter at least one template line first.")]
    MissingTemplates,
}

/// Which kind of template drives generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Built-in grammar forms
    #[default]
    FixedForm,
    /// User-supplied templates with a word marker
    Placeholder,
}

impl GenerationMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FixedForm => "grammar forms",
            Self::Placeholder => "templates",
        }
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" | "form" | "forms" | "grammar" => Ok(Self::FixedForm),
            "placeholder" | "template" | "templates" => Ok(Self::Placeholder),
            _ => Err(format!("Unknown mode: {}. Options: forms, templates", s)),
        }
    }
}

/// Sentences from one generation request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceBatch {
    pub sentences: Vec<String>,
    /// Warning shown when the service was unavailable and local sentences were used
    pub notice: Option<String>,
}

/// Sentence generator over a pluggable service
#[derive(Debug, Clone)]
pub struct SentenceGenerator<S> {
    service: S,
    marker: String,
}

impl<S: SentenceService> SentenceGenerator<S> {
    pub fn new(service: S, marker: impl Into<String>) -> Self {
        Self { service, marker: marker.into() }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Swap the service, e.g. after an API key was stored
    pub fn set_service(&mut self, service: S) {
        self.service = service;
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Generate `count` sentences (clamped to `1..=MAX_SENTENCES`)
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        templates: &[String],
        words: &[String],
        mode: GenerationMode,
    ) -> Result<SentenceBatch, GenerateError> {
        if words.is_empty() {
            return Err(GenerateError::MissingVocabulary);
        }
        let count = count.clamp(1, MAX_SENTENCES);
        let mut batch = SentenceBatch::default();

        match mode {
            GenerationMode::FixedForm => {
                let mut use_service = true;
                for _ in 0..count {
                    let grammar = GRAMMAR_FORMS.choose(rng).copied().unwrap_or(GRAMMAR_FORMS[0]);
                    let sample: Vec<String> =
                        words.choose_multiple(rng, WORDS_PER_SENTENCE).cloned().collect();
                    let prompt = SentencePrompt::new(grammar, sample);

                    let sentence = if use_service {
                        let (sentence, err) = self.render(&prompt, &mut batch.notice).await;
                        // A missing or rejected key fails the same way every time
                        if err.is_some_and(|e| e.requires_reauth()) {
                            use_service = false;
                        }
                        sentence
                    } else {
                        prompt.fallback()
                    };
                    batch.sentences.push(sentence);
                }
            }
            GenerationMode::Placeholder => {
                let lines: Vec<&str> =
                    templates.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
                if lines.is_empty() {
                    return Err(GenerateError::MissingTemplates);
                }
                for _ in 0..count {
                    let line = lines.choose(rng).copied().unwrap_or(lines[0]);
                    batch.sentences.push(self.fill_template(rng, line, words));
                }
            }
        }

        tracing::info!(
            count = batch.sentences.len(),
            mode = mode.label(),
            degraded = batch.notice.is_some(),
            "Generated sentences"
        );
        Ok(batch)
    }

    /// Ask the service for one sentence, rendering locally on failure
    ///
    /// The first failure in a batch is recorded in `notice`. The local
    /// strategy declines without a notice.
    pub async fn render(
        &self,
        prompt: &SentencePrompt,
        notice: &mut Option<String>,
    ) -> (String, Option<ServiceError>) {
        match self.service.complete(prompt).await {
            Ok(text) if prompt.accepts(&text) => (text.trim().to_string(), None),
            Ok(text) => {
                tracing::debug!(completion = %text, "Completion rejected, using local sentence");
                (prompt.fallback(), None)
            }
            Err(ServiceError::Disabled) => (prompt.fallback(), None),
            Err(err) => {
                tracing::warn!(error = %err, "Sentence service failed, using local sentence");
                if notice.is_none() {
                    *notice = Some(err.fallback_notice());
                }
                (prompt.fallback(), Some(err))
            }
        }
    }

    /// Replace every marker with an independently drawn word
    fn fill_template<R: Rng + ?Sized>(&self, rng: &mut R, line: &str, words: &[String]) -> String {
        let mut draw = || words.choose(rng).cloned().unwrap_or_default();

        if self.marker.is_empty() || !line.contains(&self.marker) {
            return format!("{} {}", line, draw());
        }

        let mut parts = line.split(self.marker.as_str());
        let mut sentence = parts.next().unwrap_or_default().to_string();
        for part in parts {
            sentence.push_str(&draw());
            sentence.push_str(part);
        }
        sentence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::Cell;

    /// Test service that answers with a fixed reply or error
    struct Scripted {
        reply: Result<String, u16>,
        calls: Cell<usize>,
    }

    impl Scripted {
        fn ok(text: &str) -> Self {
            Self { reply: Ok(text.to_string()), calls: Cell::new(0) }
        }

        fn failing(status: u16) -> Self {
            Self { reply: Err(status), calls: Cell::new(0) }
        }
    }

    impl SentenceService for Scripted {
        async fn complete(&self, _prompt: &SentencePrompt) -> Result<String, ServiceError> {
            self.calls.set(self.calls.get() + 1);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(ServiceError::ApiError { status: *status, message: String::new() }),
            }
        }
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn local() -> SentenceGenerator<Strategy> {
        SentenceGenerator::new(Strategy::Local, "{word}")
    }

    #[tokio::test]
    async fn empty_vocabulary_is_rejected_first() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = local().generate(&mut rng, 3, &[], &[], GenerationMode::Placeholder).await;
        assert_eq!(err, Err(GenerateError::MissingVocabulary));
    }

    #[tokio::test]
    async fn placeholder_mode_needs_templates() {
        let mut rng = StdRng::seed_from_u64(1);
        let templates = words(&["", "   "]);
        let err = local()
            .generate(&mut rng, 3, &templates, &words(&["你"]), GenerationMode::Placeholder)
            .await;
        assert_eq!(err, Err(GenerateError::MissingTemplates));
    }

    #[tokio::test]
    async fn count_is_clamped() {
        let mut rng = StdRng::seed_from_u64(2);
        let vocab = words(&["你", "我"]);
        let zero =
            local().generate(&mut rng, 0, &[], &vocab, GenerationMode::FixedForm).await.unwrap();
        assert_eq!(zero.sentences.len(), 1);

        let many =
            local().generate(&mut rng, 500, &[], &vocab, GenerationMode::FixedForm).await.unwrap();
        assert_eq!(many.sentences.len(), MAX_SENTENCES);
    }

    #[tokio::test]
    async fn local_fallback_is_deterministic_per_seed() {
        let vocab = words(&["学习", "中文", "朋友", "喜欢", "电影"]);
        let run = |seed| {
            let vocab = vocab.clone();
            async move {
                let mut rng = StdRng::seed_from_u64(seed);
                local().generate(&mut rng, 5, &[], &vocab, GenerationMode::FixedForm).await.unwrap()
            }
        };

        let first = run(42).await;
        assert_eq!(first, run(42).await);
        assert_eq!(first.notice, None);
    }

    #[tokio::test]
    async fn fallback_contains_pattern_and_sampled_words() {
        let vocab = words(&["学习", "中文", "朋友", "喜欢"]);
        let mut rng = StdRng::seed_from_u64(7);
        let batch =
            local().generate(&mut rng, 10, &[], &vocab, GenerationMode::FixedForm).await.unwrap();

        for sentence in &batch.sentences {
            let (pattern, rest) = sentence.split_once('：').unwrap();
            assert!(GRAMMAR_FORMS.contains(&pattern));
            let sampled: Vec<&str> = rest.split(' ').collect();
            assert_eq!(sampled.len(), 3);
            for word in sampled {
                assert!(vocab.iter().any(|v| v == word));
                assert!(sentence.contains(word));
            }
        }
    }

    #[tokio::test]
    async fn small_pool_samples_fewer_words() {
        let mut rng = StdRng::seed_from_u64(3);
        let batch = local()
            .generate(&mut rng, 1, &[], &words(&["猫"]), GenerationMode::FixedForm)
            .await
            .unwrap();
        assert!(batch.sentences[0].ends_with("：猫"));
    }

    #[tokio::test]
    async fn service_completion_is_used() {
        let generator = SentenceGenerator::new(Scripted::ok(" 我们一起学习中文。 "), "{word}");
        let mut rng = StdRng::seed_from_u64(4);
        let batch = generator
            .generate(&mut rng, 2, &[], &words(&["学习"]), GenerationMode::FixedForm)
            .await
            .unwrap();
        assert_eq!(batch.sentences, vec!["我们一起学习中文。", "我们一起学习中文。"]);
        assert_eq!(batch.notice, None);
    }

    #[tokio::test]
    async fn service_failure_degrades_with_one_notice() {
        let generator = SentenceGenerator::new(Scripted::failing(500), "{word}");
        let mut rng = StdRng::seed_from_u64(5);
        let batch = generator
            .generate(&mut rng, 3, &[], &words(&["学习", "中文"]), GenerationMode::FixedForm)
            .await
            .unwrap();

        assert_eq!(batch.sentences.len(), 3);
        assert!(batch.sentences.iter().all(|s| s.contains('：')));
        assert!(batch.notice.unwrap().contains("500"));
        assert_eq!(generator.service().calls.get(), 3);
    }

    #[tokio::test]
    async fn rejected_key_stops_further_requests() {
        let generator = SentenceGenerator::new(Scripted::failing(401), "{word}");
        let mut rng = StdRng::seed_from_u64(6);
        let batch = generator
            .generate(&mut rng, 4, &[], &words(&["学习"]), GenerationMode::FixedForm)
            .await
            .unwrap();

        assert_eq!(batch.sentences.len(), 4);
        assert_eq!(generator.service().calls.get(), 1);
    }

    #[tokio::test]
    async fn placeholder_replaces_every_marker() {
        let mut rng = StdRng::seed_from_u64(8);
        let templates = words(&["{word}和{word}都是{word}"]);
        let batch = local()
            .generate(&mut rng, 3, &templates, &words(&["猫"]), GenerationMode::Placeholder)
            .await
            .unwrap();
        assert_eq!(batch.sentences, vec!["猫和猫都是猫"; 3]);
    }

    #[tokio::test]
    async fn template_without_marker_gets_a_word_appended() {
        let mut rng = StdRng::seed_from_u64(9);
        let templates = words(&["我喜欢"]);
        let batch = local()
            .generate(&mut rng, 1, &templates, &words(&["茶"]), GenerationMode::Placeholder)
            .await
            .unwrap();
        assert_eq!(batch.sentences, vec!["我喜欢 茶"]);
    }

    #[test]
    fn mode_parses_from_command_words() {
        assert_eq!("forms".parse::<GenerationMode>(), Ok(GenerationMode::FixedForm));
        assert_eq!("Templates".parse::<GenerationMode>(), Ok(GenerationMode::Placeholder));
        assert!("audio".parse::<GenerationMode>().is_err());
    }
}
