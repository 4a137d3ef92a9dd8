//! Error types for FridgeChef
//!
//! This module defines the crate-wide error enum, using `thiserror` for
//! ergonomic error handling. Image decoding has its own error type in
//! [`crate::bitmap::DecodeError`].

use crate::bitmap::DecodeError;
use thiserror::Error;

/// Main error type for FridgeChef operations
///
/// Covers startup configuration, model provider calls, prompt construction,
/// image files and camera gating. Everything raised inside a single user
/// action is caught by the controller and turned into a notice or fallback
/// message.
#[derive(Error, Debug)]
pub enum FridgechefError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, quota, malformed responses)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// A prompt mode that needs an image was requested without one
    #[error("An image is required to {0}")]
    MissingImage(String),

    /// A capture was attempted while the panel camera is switched off
    #[error("Camera is off for the {0} panel")]
    CameraOff(String),

    /// An image file given on the command line or in the REPL could not be used
    #[error("Cannot read image {path}: {source}")]
    ImageFile {
        /// Path as given by the user
        path: String,
        /// Underlying read or size-check failure
        #[source]
        source: DecodeError,
    },

    /// A one-shot action was rejected or failed; the text is the notice shown
    /// to the user
    #[error("{0}")]
    ActionFailed(String),
}

/// Result type alias for FridgeChef operations
///
/// Uses `anyhow::Error` so callers get rich context and `?` works across
/// the library's different error enums.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = FridgechefError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = FridgechefError::Provider("quota exceeded".to_string());
        assert_eq!(error.to_string(), "Provider error: quota exceeded");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = FridgechefError::MissingCredentials("gemini".to_string());
        assert_eq!(error.to_string(), "Missing credentials for provider: gemini");
    }

    #[test]
    fn test_missing_image_error_display() {
        let error = FridgechefError::MissingImage("generate recipes".to_string());
        assert_eq!(error.to_string(), "An image is required to generate recipes");
    }

    #[test]
    fn test_camera_off_error_display() {
        let error = FridgechefError::CameraOff("recipes".to_string());
        assert_eq!(error.to_string(), "Camera is off for the recipes panel");
    }

    #[test]
    fn test_image_file_error_display() {
        let error = FridgechefError::ImageFile {
            path: "fridge.jpg".to_string(),
            source: DecodeError::TooLarge {
                size: 2048,
                limit: 1024,
            },
        };
        assert_eq!(
            error.to_string(),
            "Cannot read image fridge.jpg: Image is too large: 2048 bytes (limit 1024 bytes)"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_action_failed_shows_notice_text_only() {
        let error =
            FridgechefError::ActionFailed("Could not use image: Image is empty".to_string());
        assert_eq!(error.to_string(), "Could not use image: Image is empty");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FridgechefError>();
    }
}
