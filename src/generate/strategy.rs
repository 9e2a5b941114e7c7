//! Pluggable sentence sources
//!
//! The generator asks a [`SentenceService`] for each fixed-form sentence and
//! renders the prompt locally whenever the service declines or fails.

use crate::config::{GenerationConfig, StrategyKind};
use crate::llm::{ChatMessage, LlmClient, ServiceError};

/// System prompt sent with every sentence request
const SYSTEM_PROMPT: &str = "You generate Chinese study sentences.";

/// What to ask for: one grammar pattern and the words to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePrompt {
    /// Grammar pattern the sentence should follow
    pub grammar: String,
    /// Vocabulary words the sentence should contain
    pub words: Vec<String>,
    /// Word a completion must contain to be accepted
    pub required: Option<String>,
}

impl SentencePrompt {
    pub fn new(grammar: impl Into<String>, words: Vec<String>) -> Self {
        Self { grammar: grammar.into(), words, required: None }
    }

    /// Reject completions that leave out `word`
    pub fn requiring(mut self, word: impl Into<String>) -> Self {
        self.required = Some(word.into());
        self
    }

    /// Natural-language instruction for the language model
    pub fn instruction(&self) -> String {
        format!(
            "Create one natural Chinese sentence using the grammar pattern provided. \
             Include all of the vocabulary words listed. Respond with only the sentence.\n\
             Grammar pattern: {}\n\
             Vocabulary words: {}",
            self.grammar,
            self.words.join(", ")
        )
    }

    /// Local rendering used when the service is unavailable
    pub fn fallback(&self) -> String {
        format!("{}：{}", self.grammar, self.words.join(" "))
    }

    /// Whether a completion can be used as-is
    pub fn accepts(&self, completion: &str) -> bool {
        !completion.trim().is_empty()
            && self.required.as_deref().is_none_or(|word| completion.contains(word))
    }
}

/// A source of generated sentences
#[allow(async_fn_in_trait)]
pub trait SentenceService {
    /// Produce one sentence for the prompt
    async fn complete(&self, prompt: &SentencePrompt) -> Result<String, ServiceError>;
}

/// Strategy selected by configuration
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Local templates only
    Local,
    /// Language-model service; `None` when no API key was found
    Remote(Option<LlmClient>),
}

impl Strategy {
    /// Pick the strategy named in the configuration
    pub fn from_config(config: &GenerationConfig, client: Option<LlmClient>) -> Self {
        match config.strategy {
            StrategyKind::Local => Self::Local,
            StrategyKind::Remote => Self::Remote(client),
        }
    }

    /// Short label for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote(Some(_)) => "remote",
            Self::Remote(None) => "remote (no API key)",
        }
    }
}

impl SentenceService for Strategy {
    async fn complete(&self, prompt: &SentencePrompt) -> Result<String, ServiceError> {
        match self {
            Self::Local => Err(ServiceError::Disabled),
            Self::Remote(None) => Err(ServiceError::ApiKeyNotFound),
            Self::Remote(Some(client)) => {
                client
                    .complete(vec![
                        ChatMessage::system(SYSTEM_PROMPT),
                        ChatMessage::user(prompt.instruction()),
                    ])
                    .await
            }
        }
    }
}
