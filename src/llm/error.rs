//! Error types for the language-model service

use thiserror::Error;

/// Errors that can occur when talking to the generation or speech service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// API key is not configured
    #[error("API key not configured. Set OPENAI_API_KEY or run :api-key <key>")]
    ApiKeyNotFound,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// The completion came back without any text
    #[error("Service returned an empty completion")]
    EmptyResponse,

    /// Invalid API key format
    #[error("Invalid API key format. Key should start with 'sk-'")]
    InvalidApiKey,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Remote generation is switched off in the configuration
    #[error("Remote generation is disabled")]
    Disabled,
}

impl ServiceError {
    /// Check if this error means the credential is missing or rejected
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            ServiceError::ApiKeyNotFound
                | ServiceError::InvalidApiKey
                | ServiceError::ApiError { status: 401, .. }
        )
    }

    /// Short notice shown when generation degrades to local sentences
    pub fn fallback_notice(&self) -> String {
        if self.requires_reauth() {
            format!("{self}. Using local sentences.")
        } else {
            format!("Sentence service unavailable ({self}). Using local sentences.")
        }
    }
}
