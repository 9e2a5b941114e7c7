//! API key lookup: environment first, then the system keyring

use keyring::Entry;

use super::error::ServiceError;

/// Environment variable checked before the keyring
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Service name for keyring storage
const SERVICE_NAME: &str = "shengci";
/// Entry name for the API key
const API_KEY_ENTRY: &str = "openai-api-key";

/// Manages the generation service API key
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Get the API key from the environment or the system keyring
    pub fn get_api_key() -> Result<String, ServiceError> {
        if let Some(key) = Self::from_env_value(std::env::var(API_KEY_ENV).ok()) {
            return Ok(key);
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| ServiceError::KeyringError(e.to_string()))?;

        entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => ServiceError::ApiKeyNotFound,
            _ => ServiceError::KeyringError(e.to_string()),
        })
    }

    /// Store the API key in system keyring
    pub fn set_api_key(key: &str) -> Result<(), ServiceError> {
        let key = key.trim();
        if !Self::validate_key_format(key) {
            return Err(ServiceError::InvalidApiKey);
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| ServiceError::KeyringError(e.to_string()))?;

        entry.set_password(key).map_err(|e| ServiceError::KeyringError(e.to_string()))
    }

    fn from_env_value(value: Option<String>) -> Option<String> {
        value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    /// OpenAI-style keys start with "sk-"
    fn validate_key_format(key: &str) -> bool {
        key.starts_with("sk-") && key.len() > 20
    }

    /// Mask an API key for display (show first and last 4 chars)
    pub fn mask_key(key: &str) -> String {
        if key.len() <= 12 || !key.is_ascii() {
            return "*".repeat(key.chars().count());
        }
        format!("{}...{}", &key[..7], &key[key.len() - 4..])
    }
}
