/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes these top-level command modules:

- `chat`    — Interactive assistant with panels, photos and quick actions
- `recipes` — One-shot recipe generation from a photo
- `ask`     — One-shot question, optionally about a photo
- `about`   — Static information panel

Each handler builds a provider from configuration, wraps it in a
`Controller` and prints what the controller records.
*/

use crate::bitmap::read_image_file;
use crate::config::Config;
use crate::controller::{Action, Controller, Notice, NoticeLevel, RenderInstruction};
use crate::error::{FridgechefError, Result};
use crate::providers::create_provider;
use crate::session::{ChatMessage, Role};
use colored::Colorize;
use std::path::Path;

// Special commands parser for the interactive loop
pub mod special_commands;

/// Builds a controller for the configured provider
fn build_controller(config: &Config) -> Result<Controller> {
    let provider = create_provider(&config.provider.provider_type, &config.provider)?;
    Ok(Controller::new(provider, config.session.max_image_bytes))
}

/// Reads a photo from disk for an upload or camera frame
///
/// Files over the configured image cap are rejected without being read.
async fn read_image(path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
    read_image_file(path, max_bytes).await.map_err(|source| {
        FridgechefError::ImageFile {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

/// Prints one transcript entry
fn print_message(message: &ChatMessage) {
    match message.role {
        Role::User => {
            let attachment = message
                .attached_image
                .as_ref()
                .map(|bitmap| {
                    let (width, height) = bitmap.dimensions();
                    format!(" [photo {}x{} {}]", width, height, bitmap.kind())
                })
                .unwrap_or_default();
            let content = if message.content.is_empty() {
                "(photo only)".dimmed().to_string()
            } else {
                message.content.clone()
            };
            println!(
                "{} {}{}",
                "You:".bold().blue(),
                content,
                attachment.dimmed()
            );
        }
        Role::Assistant => {
            println!("{}\n{}\n", "FridgeChef:".bold().green(), message.content);
        }
    }
}

/// Prints a notice to stderr
fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => eprintln!("{}", notice.text.cyan()),
        NoticeLevel::Warning => eprintln!("{}", notice.text.yellow()),
        NoticeLevel::Error => eprintln!("{}", format!("Error: {}", notice.text).red()),
    }
}

/// Dispatches an action, showing the progress label while the model works
async fn run_action(controller: &mut Controller, action: Action) -> RenderInstruction {
    if let Some(label) = action.progress_label() {
        eprintln!("{}", label.dimmed());
    }
    controller.dispatch(action).await
}

/// Runs a single action and prints the new messages
///
/// Warnings and errors are turned into a failed result carrying the notice
/// text so one-shot commands exit non-zero; the fallback reply is still
/// printed first.
async fn run_once(controller: &mut Controller, action: Action) -> Result<()> {
    let render = run_action(controller, action).await;
    for message in controller.session().messages() {
        if message.role == Role::Assistant {
            print_message(message);
        }
    }

    match render.notice {
        Some(notice) if notice.level != NoticeLevel::Info => {
            Err(FridgechefError::ActionFailed(notice.text).into())
        }
        Some(notice) => {
            print_notice(&notice);
            Ok(())
        }
        None => Ok(()),
    }
}

// Interactive chat handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Runs a readline loop on one panel at a time. Plain text is submitted
    //! to the controller; slash commands stand in for the panel buttons.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::panel::{about_text, Panel};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `panel` - Optional override for the starting panel
    ///
    /// # Errors
    ///
    /// Returns error if the panel name is invalid, the provider cannot be
    /// created, or the terminal cannot be initialised
    pub async fn run_chat(config: Config, panel: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let mut panel = match panel.as_deref() {
            Some(name) => Panel::parse_str(name).map_err(FridgechefError::Config)?,
            None => config.default_panel(),
        };

        let max_bytes = config.session.max_image_bytes;
        let mut controller = build_controller(&config)?;
        let mut rl = DefaultEditor::new()?;
        let mut shown = 0;

        print_welcome_banner(panel, &config);

        loop {
            let prompt = format!("{} >> ", panel.colored_tag());
            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            };

            let trimmed = line.trim();
            if !trimmed.is_empty() {
                let _ = rl.add_history_entry(trimmed);
            }

            let command = match parse_special_command(trimmed) {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("{}\n", e.to_string().red());
                    continue;
                }
            };

            let action = match command {
                SpecialCommand::Exit => break,
                SpecialCommand::Blank => continue,
                SpecialCommand::Help => {
                    print_help();
                    continue;
                }
                SpecialCommand::About => {
                    println!("\n{}\n", about_text());
                    continue;
                }
                SpecialCommand::ShowStatus => {
                    print_status_display(&controller, panel);
                    continue;
                }
                SpecialCommand::SwitchPanel(next) => {
                    panel = next;
                    println!("Switched to {} ({})\n", panel.colored_tag(), panel.description());
                    if panel == Panel::About {
                        println!("{}\n", about_text());
                    }
                    continue;
                }
                SpecialCommand::ToggleCamera => Action::ToggleCamera { panel },
                SpecialCommand::Clear => Action::Clear,
                SpecialCommand::Quick(kind) => Action::QuickAction(kind),
                SpecialCommand::Upload(path) => match read_image(&path, max_bytes).await {
                    Ok(bytes) => Action::AttachImage { panel, bytes },
                    Err(e) => {
                        eprintln!("{}\n", e.to_string().red());
                        continue;
                    }
                },
                SpecialCommand::Capture(path) => match read_image(&path, max_bytes).await {
                    Ok(bytes) => Action::Capture { panel, bytes },
                    Err(e) => {
                        eprintln!("{}\n", e.to_string().red());
                        continue;
                    }
                },
                SpecialCommand::Recipes(path) => {
                    let image = match path {
                        Some(path) => match read_image(&path, max_bytes).await {
                            Ok(bytes) => Some(bytes),
                            Err(e) => {
                                eprintln!("{}\n", e.to_string().red());
                                continue;
                            }
                        },
                        None => None,
                    };
                    Action::GenerateRecipes { panel, image }
                }
                SpecialCommand::None => Action::Submit {
                    panel,
                    text: trimmed.to_string(),
                    image: None,
                },
            };

            let is_clear = action == Action::Clear;
            // Typed text is already on screen
            let echo_user = !matches!(&action, Action::Submit { text, .. } if !text.is_empty());
            let render = run_action(&mut controller, action).await;

            if is_clear && render.redraw {
                shown = 0;
                println!("{}\n", "Conversation cleared".dimmed());
            }

            let messages = controller.session().messages();
            for message in messages.iter().skip(shown) {
                if message.role == Role::User && !echo_user {
                    continue;
                }
                print_message(message);
            }
            shown = messages.len();

            if let Some(notice) = &render.notice {
                print_notice(notice);
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(panel: Panel, config: &Config) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║           FridgeChef - Your Smart Kitchen Companion          ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Panel:    {} ({})", panel.colored_tag(), panel.description());
        println!("Provider: {}\n", config.provider.provider_type.cyan());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display status information about the current session
    fn print_status_display(controller: &Controller, panel: Panel) {
        let session = controller.session();
        let model = controller
            .provider()
            .get_current_model()
            .unwrap_or_else(|_| "unknown".to_string());
        let pending = session
            .pending_image()
            .map(|bitmap| {
                let (width, height) = bitmap.dimensions();
                format!("{}x{} {}", width, height, bitmap.kind())
            })
            .unwrap_or_else(|| "none".to_string());

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    FridgeChef Session Status                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Session:           {}", session.id());
        println!("Panel:             {}", panel.colored_tag());
        println!("Model:             {}", model);
        println!("Conversation Size: {} messages", session.messages().len());
        println!("Attached Photo:    {}", pending);
        for interactive in Panel::INTERACTIVE {
            println!(
                "Camera ({:<11}): {}",
                interactive.to_string(),
                session.camera(interactive)
            );
        }
        println!();
    }
}

// One-shot recipe generation
pub mod recipes {
    use super::*;
    use crate::panel::Panel;

    /// List ingredients in a photo and print recipe suggestions
    ///
    /// # Errors
    ///
    /// Returns error if the photo cannot be read or decoded, or if the model
    /// call fails (after printing the fallback reply)
    pub async fn run_recipes(config: Config, image: &Path) -> Result<()> {
        tracing::info!("Generating recipes from {}", image.display());
        let bytes = read_image(image, config.session.max_image_bytes).await?;
        let mut controller = build_controller(&config)?;
        run_once(
            &mut controller,
            Action::GenerateRecipes {
                panel: Panel::Recipes,
                image: Some(bytes),
            },
        )
        .await
    }
}

// One-shot question
pub mod ask {
    use super::*;
    use crate::panel::Panel;

    /// Ask the cooking assistant a single question
    ///
    /// With a photo the question goes out on the ingredients panel, which
    /// grounds the answer in the image.
    ///
    /// # Errors
    ///
    /// Returns error if the photo cannot be read or decoded, or if the model
    /// call fails (after printing the fallback reply)
    pub async fn run_ask(config: Config, message: String, image: Option<&Path>) -> Result<()> {
        let image = match image {
            Some(path) => Some(read_image(path, config.session.max_image_bytes).await?),
            None => None,
        };
        let panel = if image.is_some() {
            Panel::Ingredients
        } else {
            Panel::Chat
        };

        let mut controller = build_controller(&config)?;
        run_once(
            &mut controller,
            Action::Submit {
                panel,
                text: message,
                image,
            },
        )
        .await
    }
}

// Static information panel
pub mod about {
    use crate::panel::about_text;

    /// Print the about panel
    pub fn show_about() {
        println!("{}", about_text());
    }
}
