//! Command-line interface definition for FridgeChef
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat plus one-shot recipe and question commands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// FridgeChef - turn photos of your ingredients into recipes
///
/// Chat with a cooking assistant, share photos of your fridge, and get
/// recipe ideas from a multimodal model.
#[derive(Parser, Debug, Clone)]
#[command(name = "fridgechef")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for FridgeChef
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive assistant
    Chat {
        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Panel to start on: chat, recipes or ingredients
        #[arg(long)]
        panel: Option<String>,
    },

    /// List ingredients in a photo and suggest recipes
    Recipes {
        /// Photo of your fridge or ingredients (JPEG or PNG)
        #[arg(short, long)]
        image: PathBuf,

        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Ask the cooking assistant a single question
    Ask {
        /// Your question
        #[arg(short, long)]
        message: String,

        /// Optional photo to ground the answer in
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Show information about FridgeChef
    About,
}

impl Commands {
    /// Provider override supplied on the command line, if any
    pub fn provider_override(&self) -> Option<&str> {
        match self {
            Self::Chat { provider, .. }
            | Self::Recipes { provider, .. }
            | Self::Ask { provider, .. } => provider.as_deref(),
            Self::About => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: DEFAULT_CONFIG_PATH.to_string(),
            verbose: false,
            command: Commands::About,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, "config/config.yaml");
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::About));
    }

    #[test]
    fn test_cli_config_defaults_when_flag_absent() {
        let cli = Cli::try_parse_from(["fridgechef", "about"]).unwrap();
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["fridgechef", "chat"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Chat {
                provider: None,
                panel: None
            }
        ));
    }

    #[test]
    fn test_cli_parse_chat_with_panel_and_provider() {
        let cli = Cli::try_parse_from([
            "fridgechef",
            "chat",
            "--panel",
            "recipes",
            "--provider",
            "ollama",
        ])
        .unwrap();
        if let Commands::Chat { provider, panel } = &cli.command {
            assert_eq!(provider.as_deref(), Some("ollama"));
            assert_eq!(panel.as_deref(), Some("recipes"));
        } else {
            panic!("Expected Chat command");
        }
        assert_eq!(cli.command.provider_override(), Some("ollama"));
    }

    #[test]
    fn test_cli_parse_recipes_requires_image() {
        assert!(Cli::try_parse_from(["fridgechef", "recipes"]).is_err());

        let cli = Cli::try_parse_from(["fridgechef", "recipes", "--image", "fridge.jpg"]).unwrap();
        if let Commands::Recipes { image, provider } = cli.command {
            assert_eq!(image, PathBuf::from("fridge.jpg"));
            assert!(provider.is_none());
        } else {
            panic!("Expected Recipes command");
        }
    }

    #[test]
    fn test_cli_parse_ask_with_image() {
        let cli = Cli::try_parse_from([
            "fridgechef",
            "ask",
            "--message",
            "Are these fresh?",
            "--image",
            "veg.png",
        ])
        .unwrap();
        if let Commands::Ask {
            message,
            image,
            provider,
        } = cli.command
        {
            assert_eq!(message, "Are these fresh?");
            assert_eq!(image, Some(PathBuf::from("veg.png")));
            assert!(provider.is_none());
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli =
            Cli::try_parse_from(["fridgechef", "--config", "my.yaml", "--verbose", "about"])
                .unwrap();
        assert_eq!(cli.config, "my.yaml");
        assert!(cli.verbose);
        assert_eq!(cli.command.provider_override(), None);
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["fridgechef", "bake"]).is_err());
    }
}
