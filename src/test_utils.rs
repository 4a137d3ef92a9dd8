//! Test utilities for FridgeChef
//!
//! Helpers for building image fixtures, configurations and assertions.

use crate::bitmap::{decode_bitmap, Bitmap, DEFAULT_MAX_IMAGE_BYTES};
use crate::config::Config;
use std::io::Cursor;

/// Encode a small solid-color image in the given format
///
/// Each (width, height) pair produces distinct bytes, so fixtures built with
/// different sizes compare unequal.
///
/// # Panics
///
/// Panics if the `image` encoder rejects the format
pub fn encode_test_image(format: image::ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
    let mut cursor = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut cursor, format)
        .expect("Failed to encode test image");
    cursor.into_inner()
}

/// Decode a PNG fixture of the given size into a [`Bitmap`]
pub fn test_bitmap(width: u32, height: u32) -> Bitmap {
    decode_bitmap(
        &encode_test_image(image::ImageFormat::Png, width, height),
        DEFAULT_MAX_IMAGE_BYTES,
    )
    .expect("Failed to decode test image")
}

/// Create a test configuration with a dummy Gemini credential
///
/// # Examples
///
/// ```ignore
/// let config = fridgechef::test_utils::test_config();
/// assert!(config.validate().is_ok());
/// ```
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.provider.gemini.api_key = Some("test-key".to_string());
    config
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T, E: std::fmt::Display>(result: Result<T, E>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FridgechefError;

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<(), FridgechefError> =
            Err(FridgechefError::MissingImage("generate recipes".to_string()));
        assert_error_contains(result, "image is required");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<(), FridgechefError> =
            Err(FridgechefError::Config("bad panel".to_string()));
        assert_error_contains(result, "quota");
    }

    #[test]
    #[should_panic(expected = "but got Ok")]
    fn test_assert_error_contains_ok_result() {
        assert_error_contains(Ok::<(), String>(()), "anything");
    }

    #[test]
    fn test_bitmap_fixtures_differ_by_size() {
        assert_eq!(test_bitmap(3, 2).dimensions(), (3, 2));
        assert_ne!(test_bitmap(2, 2), test_bitmap(3, 3));
    }

    #[test]
    fn test_config_has_credential() {
        assert!(test_config().validate().is_ok());
    }
}
