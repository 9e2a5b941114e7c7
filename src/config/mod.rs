//! Configuration management for shengci

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::generate::GenerationMode;
use crate::quiz::QuizVariant;
use crate::theme::Theme;

/// Where practice sentences come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Local templates only, never touches the network
    Local,
    /// Ask the language-model service, fall back to local templates
    #[default]
    Remote,
}

/// Settings for the language-model service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Local or remote generation
    pub strategy: StrategyKind,

    /// API base URL
    pub base_url: String,

    /// Chat model used for sentences
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Speech model used for audio
    pub speech_model: String,

    /// Speech voice
    pub voice: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Remote,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            timeout_secs: 30,
            speech_model: "gpt-4o-mini-tts".to_string(),
            voice: "alloy".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Language-model service settings
    pub generation: GenerationConfig,

    /// Sentence source used by the generator tab
    pub generation_mode: GenerationMode,

    /// How quiz sentences are built
    pub quiz_variant: QuizVariant,

    /// Marker replaced by a random word in placeholder templates
    pub placeholder_marker: String,

    /// Default number of sentences per batch
    pub sentence_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            generation: GenerationConfig::default(),
            generation_mode: GenerationMode::FixedForm,
            quiz_variant: QuizVariant::FixedForm,
            placeholder_marker: "{word}".to_string(),
            sentence_count: 5,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config {:?}", path))
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "shengci").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "shengci").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Log file written while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("shengci.log"))
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        Theme::tokyo_night()
    }
}
