//! Ollama provider implementation for FridgeChef
//!
//! This module implements the Provider trait for Ollama, connecting to a local
//! or remote Ollama server running a vision model (llava and friends). Photos
//! travel base64-encoded in the message `images` array.

use crate::config::OllamaConfig;
use crate::error::{FridgechefError, Result};
use crate::prompts::PromptRequest;
use crate::providers::{CompletionResponse, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API provider
///
/// # Examples
///
/// ```no_run
/// use fridgechef::config::OllamaConfig;
/// use fridgechef::prompts::{build_prompt, PromptMode};
/// use fridgechef::providers::{OllamaProvider, Provider};
///
/// # async fn example() -> fridgechef::error::Result<()> {
/// let config = OllamaConfig {
///     host: "http://localhost:11434".to_string(),
///     model: "llava:latest".to_string(),
/// };
/// let provider = OllamaProvider::new(config, 120)?;
/// let request = build_prompt(PromptMode::Conversation, "Ideas for leftover rice?", None)?;
/// let completion = provider.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

/// Request structure for Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

/// Message structure for Ollama API
#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
}

/// Response structure from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Ollama configuration containing host and model
    /// * `timeout_seconds` - HTTP timeout for a single call
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use fridgechef::config::OllamaConfig;
    /// use fridgechef::providers::OllamaProvider;
    ///
    /// let provider = OllamaProvider::new(OllamaConfig::default(), 60);
    /// assert!(provider.is_ok());
    /// ```
    pub fn new(config: OllamaConfig, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("fridgechef/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                FridgechefError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Ollama provider: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Get the configured Ollama host
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_request(&self, request: &PromptRequest) -> OllamaRequest {
        let images = request
            .bitmap
            .as_ref()
            .map(|bitmap| vec![bitmap.to_base64()])
            .unwrap_or_default();

        OllamaRequest {
            model: self.config.model.clone(),
            messages: vec![OllamaMessage {
                role: "user".to_string(),
                content: request.instruction.clone(),
                images,
            }],
            stream: false,
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate(&self, request: &PromptRequest) -> Result<CompletionResponse> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));
        let ollama_request = self.build_request(request);

        tracing::debug!(
            mode = %request.mode,
            has_image = request.has_image(),
            model = %self.config.model,
            "Sending Ollama request"
        );

        let response = self
            .client
            .post(&url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                FridgechefError::Provider(format!("Ollama request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(FridgechefError::Provider(format!(
                "Ollama returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            FridgechefError::Provider(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: done={}, prompt_tokens={}, completion_tokens={}",
            ollama_response.done,
            ollama_response.prompt_eval_count,
            ollama_response.eval_count
        );

        let text = ollama_response.message.content;
        if text.trim().is_empty() {
            return Err(
                FridgechefError::Provider("Ollama returned an empty response".to_string()).into(),
            );
        }

        // Ollama omits the counters when it served the prompt from cache
        let response = if ollama_response.prompt_eval_count > 0 || ollama_response.eval_count > 0 {
            let usage = TokenUsage::new(
                ollama_response.prompt_eval_count,
                ollama_response.eval_count,
            );
            CompletionResponse::with_usage(text, usage)
        } else {
            CompletionResponse::new(text)
        };

        Ok(response)
    }

    fn get_current_model(&self) -> Result<String> {
        Ok(self.config.model.clone())
    }
}
