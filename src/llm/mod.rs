//! Language-model service integration
//!
//! Provides API key management and an HTTP client for the chat-completion
//! and speech endpoints used to enrich sentence practice.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use auth::ApiKeyManager;
pub use client::LlmClient;
pub use error::ServiceError;
pub use models::{ChatMessage, Role};
