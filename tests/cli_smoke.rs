//! Binary-level checks for configuration, credentials and one-shot commands

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

const CONFIG: &str = r#"
provider:
  type: gemini
  timeout_seconds: 10
  gemini:
    model: gemini-1.5-flash
session:
  default_panel: chat
"#;

fn fridgechef(config_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("fridgechef").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("FRIDGECHEF_PROVIDER")
        .env_remove("FRIDGECHEF_GEMINI_API_BASE")
        .env_remove("FRIDGECHEF_MAX_IMAGE_BYTES")
        .arg("--config")
        .arg(config_path);
    cmd
}

#[test]
fn test_missing_api_key_is_fatal() {
    let (_dir, config_path) = common::temp_config_file(CONFIG);

    fridgechef(&config_path)
        .env_remove("GOOGLE_API_KEY")
        .args(["ask", "--message", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Google API key found"));
}

#[test]
fn test_about_prints_panel() {
    let (_dir, config_path) = common::temp_config_file(CONFIG);

    fridgechef(&config_path)
        .env("GOOGLE_API_KEY", "dummy")
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("FridgeChef"));
}

#[test]
fn test_invalid_config_is_reported() {
    let (_dir, config_path) = common::temp_config_file(
        r#"
provider:
  type: gemini
session:
  default_panel: pantry
"#,
    );

    fridgechef(&config_path)
        .env("GOOGLE_API_KEY", "dummy")
        .arg("about")
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_panel"));
}

#[test]
fn test_recipes_requires_readable_image() {
    let (dir, config_path) = common::temp_config_file(CONFIG);

    fridgechef(&config_path)
        .env("GOOGLE_API_KEY", "dummy")
        .arg("recipes")
        .arg("--image")
        .arg(dir.path().join("missing.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read image"));
}

#[test]
fn test_recipes_rejects_oversized_image_file() {
    let (_config_dir, config_path) = common::temp_config_file(CONFIG);
    let (_image_dir, image_path) = common::temp_image_file("fridge.png", 32, 32);

    fridgechef(&config_path)
        .env("GOOGLE_API_KEY", "dummy")
        .env("FRIDGECHEF_MAX_IMAGE_BYTES", "16")
        .arg("recipes")
        .arg("--image")
        .arg(&image_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Image is too large"))
        .stderr(predicate::str::contains("Configuration error").not());
}

#[test]
fn test_recipes_reports_undecodable_image() {
    let (config_dir, config_path) = common::temp_config_file(CONFIG);
    let image_path = config_dir.path().join("notes.jpg");
    std::fs::write(&image_path, "milk, eggs, butter").unwrap();

    fridgechef(&config_path)
        .env("GOOGLE_API_KEY", "dummy")
        .arg("recipes")
        .arg("--image")
        .arg(&image_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not use image"))
        .stderr(predicate::str::contains("Provider error").not());
}

#[tokio::test]
async fn test_recipes_prints_model_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "Ingredients: kale\n\nRecipe: Kale chips"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_config_dir, config_path) = common::temp_config_file(CONFIG);
    let (_image_dir, image_path) = common::temp_image_file("fridge.png", 8, 8);

    fridgechef(&config_path)
        .env("GOOGLE_API_KEY", "dummy")
        .env("FRIDGECHEF_GEMINI_API_BASE", server.uri())
        .arg("recipes")
        .arg("--image")
        .arg(&image_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kale chips"));
}

#[tokio::test]
async fn test_ask_prints_fallback_on_model_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let (_dir, config_path) = common::temp_config_file(CONFIG);

    fridgechef(&config_path)
        .env("GOOGLE_API_KEY", "dummy")
        .env("FRIDGECHEF_GEMINI_API_BASE", server.uri())
        .args(["ask", "--message", "What about leeks?"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Sorry, I couldn't process your request.",
        ))
        .stderr(predicate::str::contains("500"));
}
