//! Provider module for FridgeChef
//!
//! This module contains the multimodal model abstraction and implementations
//! for Google Gemini and Ollama.

pub mod base;
pub mod gemini;
pub mod ollama;

pub use base::{CompletionResponse, Provider, TokenUsage};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `provider_type` - Type of provider ("gemini" or "ollama")
/// * `config` - Provider configuration
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if provider type is invalid, the credential is missing, or
/// the HTTP client cannot be built
pub fn create_provider(provider_type: &str, config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match provider_type {
        "gemini" => Ok(Box::new(GeminiProvider::new(
            config.gemini.clone(),
            config.timeout_seconds,
        )?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(
            config.ollama.clone(),
            config.timeout_seconds,
        )?)),
        _ => Err(crate::error::FridgechefError::Provider(format!(
            "Unknown provider type: {}",
            provider_type
        ))
        .into()),
    }
}
