//! Google Gemini provider implementation for FridgeChef
//!
//! This module implements the Provider trait against the Generative Language
//! `generateContent` REST endpoint. The instruction is sent as a text part and
//! the photo, when present, as an `inline_data` part.

use crate::config::GeminiConfig;
use crate::error::{FridgechefError, Result};
use crate::prompts::PromptRequest;
use crate::providers::{CompletionResponse, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use fridgechef::config::GeminiConfig;
/// use fridgechef::prompts::{build_prompt, PromptMode};
/// use fridgechef::providers::{GeminiProvider, Provider};
///
/// # async fn example() -> fridgechef::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config, 120)?;
/// let request = build_prompt(PromptMode::Conversation, "What can I cook with eggs?", None)?;
/// let completion = provider.generate(&request).await?;
/// println!("{}", completion.text);
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration; `api_key` must be set
    /// * `timeout_seconds` - HTTP timeout for a single call
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if no API key is configured, or a provider
    /// error if the HTTP client cannot be built
    pub fn new(config: GeminiConfig, timeout_seconds: u64) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                FridgechefError::MissingCredentials(format!(
                    "gemini. No Google API key found. Please set the {} environment variable.",
                    crate::config::API_KEY_ENV
                ))
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("fridgechef/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                FridgechefError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(request: &PromptRequest) -> GeminiRequest {
        let mut parts = vec![Part::Text {
            text: request.instruction.clone(),
        }];

        if let Some(bitmap) = &request.bitmap {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: bitmap.mime_type().to_string(),
                    data: bitmap.to_base64(),
                },
            });
        }

        GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        }
    }

    fn extract_text(response: GeminiResponse) -> Result<CompletionResponse> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
        {
            return Err(
                FridgechefError::Provider(format!("Gemini blocked the prompt: {}", reason)).into(),
            );
        }

        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| FridgechefError::Provider("Gemini returned no candidates".to_string()))?;

        let text: String = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(FridgechefError::Provider(format!(
                "Gemini returned an empty response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))
            .into());
        }

        Ok(match response.usage_metadata {
            Some(usage) => CompletionResponse::with_usage(
                text,
                TokenUsage::new(usage.prompt_token_count, usage.candidates_token_count),
            ),
            None => CompletionResponse::new(text),
        })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, request: &PromptRequest) -> Result<CompletionResponse> {
        let body = Self::build_request(request);

        tracing::debug!(
            mode = %request.mode,
            has_image = request.has_image(),
            model = %self.config.model,
            "Sending Gemini request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                FridgechefError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(FridgechefError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            FridgechefError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        let completion = Self::extract_text(gemini_response)?;
        if let Some(usage) = completion.usage {
            tracing::debug!(
                "Gemini response: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Ok(completion)
    }

    fn get_current_model(&self) -> Result<String> {
        Ok(self.config.model.clone())
    }
}
