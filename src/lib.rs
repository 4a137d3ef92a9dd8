//! FridgeChef - recipe assistant library
//!
//! This library provides the core functionality behind the FridgeChef CLI:
//! turning photos of ingredients into recipes and answering cooking questions
//! through a multimodal model.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `bitmap`: Decoding uploaded and captured photos
//! - `prompts`: Instruction templates for extraction and conversation
//! - `providers`: Model client abstraction and implementations (Gemini, Ollama)
//! - `session`: Transcript, staged photo and per-panel cameras
//! - `controller`: Maps user actions onto the session and the model
//! - `panel`: The application's panels
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use fridgechef::controller::{Action, Controller};
//! use fridgechef::providers::create_provider;
//! use fridgechef::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider.provider_type, &config.provider)?;
//!     let mut controller = Controller::new(provider, config.session.max_image_bytes);
//!     let photo = std::fs::read("fridge.jpg")?;
//!     controller
//!         .dispatch(Action::GenerateRecipes {
//!             panel: fridgechef::Panel::Recipes,
//!             image: Some(photo),
//!         })
//!         .await;
//!     Ok(())
//! }
//! ```

pub mod bitmap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod panel;
pub mod prompts;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use bitmap::{decode_bitmap, Bitmap, DecodeError};
pub use config::Config;
pub use controller::{Action, Controller, QuickAction, RenderInstruction};
pub use error::{FridgechefError, Result};
pub use panel::Panel;
pub use session::{CameraState, ChatMessage, Role, SessionState};

#[cfg(test)]
pub mod test_utils;
