//! HTTP client for the OpenAI-compatible completion and speech API

use std::time::Duration;

use reqwest::{Client, Response};

use super::auth::ApiKeyManager;
use super::error::ServiceError;
use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SpeechRequest};
use crate::config::GenerationConfig;

/// Language-model API client
#[derive(Debug, Clone)]
pub struct LlmClient {
    /// HTTP client
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL without trailing slash, e.g. `https://api.openai.com/v1`
    base_url: String,
    /// Chat model identifier
    model: String,
    /// Sampling temperature for completions
    temperature: f32,
    /// Speech model identifier
    speech_model: String,
    /// Voice used for speech synthesis
    voice: String,
}

impl LlmClient {
    /// Create a client with an explicit API key
    pub fn new(api_key: String, config: &GenerationConfig) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            speech_model: config.speech_model.clone(),
            voice: config.voice.clone(),
        })
    }

    /// Create a client using the stored API key
    pub fn from_config(config: &GenerationConfig) -> Result<Self, ServiceError> {
        Self::new(ApiKeyManager::get_api_key()?, config)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a chat request and return the trimmed text of the first choice
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, ServiceError> {
        let request =
            ChatCompletionRequest::new(&self.model, messages).with_temperature(self.temperature);

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        completion.text().map(str::to_string).ok_or(ServiceError::EmptyResponse)
    }

    /// Synthesize speech and return the encoded audio bytes
    pub async fn synthesize_speech(&self, input: &str) -> Result<Vec<u8>, ServiceError> {
        let request = SpeechRequest {
            model: self.speech_model.clone(),
            voice: self.voice.clone(),
            input: input.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint("audio/speech"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        Ok(response.bytes().await?.to_vec())
    }

    /// Map non-success statuses to [`ServiceError::ApiError`]
    async fn check_status(response: Response) -> Result<Response, ServiceError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ServiceError::ApiError {
                status: 401,
                message: "Invalid API key".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::ApiError { status: status.as_u16(), message });
        }

        Ok(response)
    }
}
