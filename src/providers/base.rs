//! Base provider trait and common types for FridgeChef
//!
//! This module defines the Provider trait that every multimodal model client
//! implements, along with the response types shared by them.

use crate::error::Result;
use crate::prompts::PromptRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token usage information from a completion
///
/// Tracks the number of tokens used in prompts and completions,
/// as reported by the AI provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt (including image tokens)
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use fridgechef::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Completion response with generated text and optional token usage
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Text returned by the model
    pub text: String,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse without usage data
    ///
    /// # Examples
    ///
    /// ```
    /// use fridgechef::providers::CompletionResponse;
    ///
    /// let response = CompletionResponse::new("Try a frittata.");
    /// assert_eq!(response.text, "Try a frittata.");
    /// assert!(response.usage.is_none());
    /// ```
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            usage: Some(usage),
        }
    }
}

/// Provider trait for multimodal model clients
///
/// Every call is a single attempt: failures are returned to the caller,
/// which decides how to present them.
///
/// # Examples
///
/// ```no_run
/// use fridgechef::providers::{CompletionResponse, Provider};
/// use fridgechef::prompts::PromptRequest;
/// use fridgechef::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn generate(&self, request: &PromptRequest) -> Result<CompletionResponse> {
///         Ok(CompletionResponse::new(request.instruction.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Sends one prompt (instruction text plus optional image) to the model
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, quota
    /// rejection, a blocked prompt, or a response with no usable text
    async fn generate(&self, request: &PromptRequest) -> Result<CompletionResponse>;

    /// Get the name of the currently active model
    ///
    /// # Default Implementation
    ///
    /// The default implementation returns a generic unavailable message.
    fn get_current_model(&self) -> Result<String> {
        Err(crate::error::FridgechefError::Provider(
            "Current model information is not available from this provider".to_string(),
        )
        .into())
    }
}
