//! Prompt construction for model calls
//!
//! This module turns a mode, the user's text and an optional photo into a
//! [`PromptRequest`] ready for a provider. Building a prompt is pure: nothing
//! here touches the session or the network.

pub mod conversation_prompt;
pub mod extraction_prompt;

use crate::bitmap::Bitmap;
use crate::error::FridgechefError;
use std::fmt;

/// Which fixed instruction template a request uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// List ingredients in a photo and suggest recipes; needs an image
    Extraction,
    /// Answer the user's message as a cooking assistant; image optional
    Conversation,
}

impl fmt::Display for PromptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extraction => write!(f, "extraction"),
            Self::Conversation => write!(f, "conversation"),
        }
    }
}

/// A single request to the model, built fresh per call
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    /// Template the instruction was built from
    pub mode: PromptMode,
    /// Full instruction text sent to the model
    pub instruction: String,
    /// The user's text as typed (empty for photo-only extraction)
    pub user_text: String,
    /// Photo sent alongside the instruction
    pub bitmap: Option<Bitmap>,
}

impl PromptRequest {
    /// Whether the request carries a photo
    pub fn has_image(&self) -> bool {
        self.bitmap.is_some()
    }
}

/// Builds a prompt request for the given mode
///
/// # Arguments
///
/// * `mode` - Template to use
/// * `text` - The user's text (ignored by extraction mode)
/// * `bitmap` - Optional photo
///
/// # Errors
///
/// Returns `FridgechefError::MissingImage` when extraction mode is asked for
/// without a photo.
///
/// # Examples
///
/// ```
/// use fridgechef::prompts::{build_prompt, PromptMode};
///
/// let request = build_prompt(PromptMode::Conversation, "Dinner ideas?", None).unwrap();
/// assert!(request.instruction.contains("Dinner ideas?"));
/// assert!(build_prompt(PromptMode::Extraction, "", None).is_err());
/// ```
pub fn build_prompt(
    mode: PromptMode,
    text: &str,
    bitmap: Option<Bitmap>,
) -> Result<PromptRequest, FridgechefError> {
    let instruction = match mode {
        PromptMode::Extraction => {
            if bitmap.is_none() {
                return Err(FridgechefError::MissingImage(
                    "list ingredients and suggest recipes".to_string(),
                ));
            }
            extraction_prompt::generate_extraction_prompt()
        }
        PromptMode::Conversation => {
            conversation_prompt::generate_conversation_prompt(text, bitmap.is_some())
        }
    };

    Ok(PromptRequest {
        mode,
        instruction,
        user_text: text.to_string(),
        bitmap,
    })
}
