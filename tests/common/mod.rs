use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use fridgechef::error::{FridgechefError, Result};
use fridgechef::prompts::PromptRequest;
use fridgechef::providers::{CompletionResponse, Provider};

/// Encode a solid-color image fixture
#[allow(dead_code)]
pub fn encode_image(format: image::ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([90, 160, 60]));
    let mut cursor = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut cursor, format)
        .expect("failed to encode fixture image");
    cursor.into_inner()
}

/// Write a PNG fixture into a fresh temp dir
#[allow(dead_code)]
pub fn temp_image_file(name: &str, width: u32, height: u32) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let path = temp_dir.path().join(name);
    fs::write(&path, encode_image(image::ImageFormat::Png, width, height))
        .expect("failed to write image file");
    (temp_dir, path)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Provider that records requests and replies from a queue
///
/// An `Err` entry simulates a failed model call. Once the queue is empty the
/// provider answers with a generic reply.
#[allow(dead_code)]
pub struct ScriptedProvider {
    pub requests: Arc<Mutex<Vec<PromptRequest>>>,
    replies: Mutex<Vec<std::result::Result<String, String>>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn new(replies: Vec<std::result::Result<String, String>>) -> Self {
        let mut replies = replies;
        replies.reverse();
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            replies: Mutex::new(replies),
        }
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate(&self, request: &PromptRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop() {
            Some(Ok(text)) => Ok(CompletionResponse::new(text)),
            Some(Err(message)) => Err(FridgechefError::Provider(message).into()),
            None => Ok(CompletionResponse::new("Here are some ideas.")),
        }
    }
}
