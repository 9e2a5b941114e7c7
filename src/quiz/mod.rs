//! Tone recognition quiz
//!
//! The engine is either idle or holds one live question. `new_quiz` always
//! replaces the live question; `check_answer` grades it without consuming it,
//! so the same question can be answered again until a new one is requested.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generate::{GRAMMAR_FORMS, SentenceGenerator, SentencePrompt, SentenceService};
use crate::vocab::VocabularyStore;

/// Delimiters around the target word in a quiz sentence
pub const MARK_OPEN: char = '【';
pub const MARK_CLOSE: char = '】';

/// Tone labels offered by the answer picker
pub const TONE_CHOICES: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Other vocabulary words placed next to the target in fixed-form sentences
const COMPANION_WORDS: usize = 2;

/// Quiz preconditions and state errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Load vocabulary CSV files with a 'tone' column to enable the quiz.")]
    MissingTones,

    #[error("No active quiz. Start one with :quiz")]
    NoActiveQuiz,
}

/// How a quiz sentence is built around the target word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizVariant {
    /// Grammar form through the sentence generator
    #[default]
    FixedForm,
    /// Three to six sampled vocabulary words
    Sampled,
}

impl QuizVariant {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FixedForm => "grammar forms",
            Self::Sampled => "sampled words",
        }
    }
}

impl FromStr for QuizVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" | "form" | "forms" | "grammar" => Ok(Self::FixedForm),
            "sampled" | "sample" | "words" => Ok(Self::Sampled),
            _ => Err(format!("Unknown quiz variant: {}. Options: forms, sampled", s)),
        }
    }
}

/// A live quiz question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    /// Sentence with the target word marked once
    pub sentence: String,
    pub target_word: String,
    pub correct_tone: String,
}

/// A freshly created question, with any service warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStart {
    pub question: QuizQuestion,
    pub notice: Option<String>,
}

/// Result of grading an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Correct,
    Incorrect { correct_tone: String },
}

impl QuizOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl fmt::Display for QuizOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct => write!(f, "Correct"),
            Self::Incorrect { correct_tone } => {
                write!(f, "Incorrect, correct tone is {}", correct_tone)
            }
        }
    }
}

/// Long-lived quiz state machine
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    current: Option<QuizQuestion>,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live question, if any
    pub fn current(&self) -> Option<&QuizQuestion> {
        self.current.as_ref()
    }

    /// Return to idle
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Pick a (word, tone) pair and build a question around it
    pub async fn new_quiz<S, R>(
        &mut self,
        rng: &mut R,
        store: &VocabularyStore,
        generator: &SentenceGenerator<S>,
        variant: QuizVariant,
    ) -> Result<QuizStart, QuizError>
    where
        S: SentenceService,
        R: Rng + ?Sized,
    {
        let entries = store.tone_entries();
        let &(word, tone) = entries.choose(rng).ok_or(QuizError::MissingTones)?;
        let pool = store.all_words();

        let mut notice = None;
        let sentence = match variant {
            QuizVariant::FixedForm => {
                let grammar = GRAMMAR_FORMS.choose(rng).copied().unwrap_or(GRAMMAR_FORMS[0]);
                let others: Vec<&String> = pool.iter().filter(|w| w.as_str() != word).collect();
                let mut words = vec![word.to_string()];
                words.extend(others.choose_multiple(rng, COMPANION_WORDS).map(|w| w.to_string()));

                let prompt = SentencePrompt::new(grammar, words).requiring(word);
                generator.render(&prompt, &mut notice).await.0
            }
            QuizVariant::Sampled => sampled_sentence(rng, word, &pool),
        };

        let question = QuizQuestion {
            sentence: mark_target(&sentence, word),
            target_word: word.to_string(),
            correct_tone: tone.to_string(),
        };
        tracing::info!(word = %question.target_word, ?variant, "New quiz question");

        self.current = Some(question.clone());
        Ok(QuizStart { question, notice })
    }

    /// Grade a tone choice against the live question
    pub fn check_answer(&self, chosen_tone: &str) -> Result<QuizOutcome, QuizError> {
        let question = self.current.as_ref().ok_or(QuizError::NoActiveQuiz)?;
        if chosen_tone == question.correct_tone {
            Ok(QuizOutcome::Correct)
        } else {
            Ok(QuizOutcome::Incorrect { correct_tone: question.correct_tone.clone() })
        }
    }
}

/// Three to six pool words, with the target forced in when absent
fn sampled_sentence<R: Rng + ?Sized>(rng: &mut R, target: &str, pool: &[String]) -> String {
    let amount = rng.random_range(3..=6usize).min(pool.len().max(1));
    let mut sample: Vec<&str> = pool.choose_multiple(rng, amount).map(String::as_str).collect();

    if !sample.contains(&target) {
        if sample.is_empty() {
            sample.push(target);
        } else {
            let slot = rng.random_range(0..sample.len());
            sample[slot] = target;
        }
    }
    sample.concat()
}

/// Wrap the first occurrence of `target` in quiz brackets
pub fn mark_target(sentence: &str, target: &str) -> String {
    match sentence.find(target) {
        Some(start) if !target.is_empty() => {
            let end = start + target.len();
            format!(
                "{}{MARK_OPEN}{}{MARK_CLOSE}{}",
                &sentence[..start],
                &sentence[start..end],
                &sentence[end..]
            )
        }
        _ => format!("{MARK_OPEN}{target}{MARK_CLOSE}{sentence}"),
    }
}
