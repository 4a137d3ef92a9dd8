//! Image decoding for uploaded and captured photos
//!
//! Raw bytes coming from an upload or a camera frame are sniffed, checked
//! against the configured size cap and decoded with the `image` crate into a
//! [`Bitmap`]. The bitmap keeps the original encoded bytes so providers can
//! forward them (base64-encoded) without re-encoding.

use base64::Engine;
use image::{DynamicImage, GenericImageView};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Default upper bound for a single image (10 MB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10_485_760;

/// Error type for image decoding
///
/// A decode error is local to the action that supplied the bytes: the action
/// is abandoned and no message is recorded.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// No bytes were supplied
    #[error("Image is empty")]
    Empty,

    /// Bytes are not in a supported raster format
    #[error("Unsupported image format: {0}")]
    Unsupported(String),

    /// Format was recognised but the data could not be decoded
    #[error("Image decoding failed: {0}")]
    Corrupt(String),

    /// Input exceeds the configured size cap
    #[error("Image is too large: {size} bytes (limit {limit} bytes)")]
    TooLarge {
        /// Size of the rejected input
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// IO error while reading an image file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// WebP image
    Webp,
    /// GIF image
    Gif,
    /// BMP image
    Bmp,
}

impl ImageKind {
    /// MIME type sent to the model alongside the image data
    ///
    /// # Examples
    ///
    /// ```
    /// use fridgechef::bitmap::ImageKind;
    ///
    /// assert_eq!(ImageKind::Jpeg.mime_type(), "image/jpeg");
    /// ```
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }

    fn from_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::WebP => Some(Self::Webp),
            image::ImageFormat::Gif => Some(Self::Gif),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Jpeg => write!(f, "JPEG"),
            Self::Webp => write!(f, "WebP"),
            Self::Gif => write!(f, "GIF"),
            Self::Bmp => write!(f, "BMP"),
        }
    }
}

/// Decoded in-memory image handle
///
/// Cloning is cheap: pixel data and encoded bytes are reference counted, and
/// both are released once the last clone (session, message or in-flight
/// request) is dropped.
#[derive(Clone)]
pub struct Bitmap {
    encoded: Arc<[u8]>,
    pixels: Arc<DynamicImage>,
    kind: ImageKind,
}

impl Bitmap {
    /// Image format detected at decode time
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// MIME type of the encoded bytes
    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Decoded pixel data
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Original encoded bytes as supplied by the user
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Size of the encoded bytes
    pub fn byte_len(&self) -> usize {
        self.encoded.len()
    }

    /// Base64 (standard alphabet, padded) encoding of the original bytes
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.encoded)
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.encoded, &other.encoded) || self.encoded == other.encoded
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.dimensions();
        f.debug_struct("Bitmap")
            .field("kind", &self.kind)
            .field("width", &width)
            .field("height", &height)
            .field("bytes", &self.encoded.len())
            .finish()
    }
}

/// Decodes raw image bytes into a [`Bitmap`]
///
/// # Arguments
///
/// * `bytes` - Raw upload or camera bytes
/// * `max_bytes` - Size cap; larger inputs are rejected before decoding
///
/// # Errors
///
/// Returns `DecodeError` if the input is empty, too large, not a supported
/// format, or corrupt.
///
/// # Examples
///
/// ```
/// use fridgechef::bitmap::{decode_bitmap, DecodeError, DEFAULT_MAX_IMAGE_BYTES};
///
/// let result = decode_bitmap(b"definitely not an image", DEFAULT_MAX_IMAGE_BYTES);
/// assert!(matches!(result, Err(DecodeError::Unsupported(_))));
/// ```
pub fn decode_bitmap(bytes: &[u8], max_bytes: usize) -> Result<Bitmap, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    if bytes.len() > max_bytes {
        return Err(DecodeError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }

    let format =
        image::guess_format(bytes).map_err(|e| DecodeError::Unsupported(e.to_string()))?;
    let kind = ImageKind::from_format(format)
        .ok_or_else(|| DecodeError::Unsupported(format!("{:?}", format)))?;

    let pixels = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::Corrupt(e.to_string()))?;

    tracing::debug!(
        format = %kind,
        width = pixels.width(),
        height = pixels.height(),
        bytes = bytes.len(),
        "Decoded image"
    );

    Ok(Bitmap {
        encoded: Arc::from(bytes),
        pixels: Arc::new(pixels),
        kind,
    })
}

/// Reads an image file from disk for an upload or camera frame
///
/// The file size is checked against `max_bytes` before the contents are
/// read into memory. The bytes are not decoded here; that happens when the
/// action carrying them is dispatched.
///
/// # Errors
///
/// Returns `DecodeError::TooLarge` for an oversized file and
/// `DecodeError::Io` if the file cannot be inspected or read.
pub async fn read_image_file(path: &Path, max_bytes: usize) -> Result<Vec<u8>, DecodeError> {
    let metadata = tokio::fs::metadata(path).await?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if size > max_bytes {
        return Err(DecodeError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    Ok(tokio::fs::read(path).await?)
}
