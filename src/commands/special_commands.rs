//! Special commands parser for interactive chat mode
//!
//! This module parses the slash commands that stand in for the buttons and
//! widgets of each panel. Special commands allow users to:
//! - Attach a photo from disk or take one with the panel camera
//! - Ask for recipes from a photo and fire quick actions
//! - Switch panels, clear the conversation and inspect the session
//!
//! Command names are case-insensitive; file path arguments keep their case.

use crate::controller::QuickAction;
use crate::panel::Panel;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Attach a photo file to the next message
    Upload(PathBuf),

    /// Switch the current panel's camera on or off
    ToggleCamera,

    /// Take a photo; the file stands in for the camera frame
    Capture(PathBuf),

    /// Ask for ingredients and recipes, optionally from a new photo
    Recipes(Option<PathBuf>),

    /// Send a canned question
    Quick(QuickAction),

    /// Empty the conversation and staged photo
    Clear,

    /// Move to another panel
    SwitchPanel(Panel),

    /// Show the about panel
    About,

    /// Display current panel, camera and session status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Empty line; nothing is sent
    Blank,

    /// Not a special command, should be sent as a message
    None,
}

/// Parses user input to detect special commands
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is not
/// a valid command, `CommandError::MissingArgument` if a required argument is
/// absent, and `CommandError::UnsupportedArgument` for an invalid argument.
///
/// # Examples
///
/// ```
/// use fridgechef::commands::special_commands::{parse_special_command, SpecialCommand};
/// use fridgechef::panel::Panel;
///
/// let cmd = parse_special_command("/panel recipes").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchPanel(Panel::Recipes));
///
/// let cmd = parse_special_command("what goes with kale?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/bake").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(SpecialCommand::Blank);
    }
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }

    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command.to_lowercase(), arg.trim()),
        None => (lower.clone(), ""),
    };

    match command.as_str() {
        "/upload" | "/attach" => required_path(&command, arg, "/upload <path>")
            .map(SpecialCommand::Upload),
        "/camera" => no_argument(&command, arg, SpecialCommand::ToggleCamera),
        "/capture" => required_path(&command, arg, "/capture <path>")
            .map(SpecialCommand::Capture),
        "/recipes" | "/generate" => Ok(SpecialCommand::Recipes(
            (!arg.is_empty()).then(|| PathBuf::from(arg)),
        )),
        "/quick" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command,
                    usage: "/quick <ideas|healthy|meals>".to_string(),
                });
            }
            QuickAction::parse_str(arg)
                .map(SpecialCommand::Quick)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command,
                    arg: arg.to_string(),
                })
        }
        "/clear" => no_argument(&command, arg, SpecialCommand::Clear),
        "/panel" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command,
                    usage: "/panel <chat|recipes|ingredients|about>".to_string(),
                });
            }
            Panel::parse_str(arg)
                .map(SpecialCommand::SwitchPanel)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command,
                    arg: arg.to_string(),
                })
        }
        "/about" => no_argument(&command, arg, SpecialCommand::About),
        "/status" => no_argument(&command, arg, SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(command)),
    }
}

fn required_path(command: &str, arg: &str, usage: &str) -> Result<PathBuf, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(PathBuf::from(arg))
    }
}

fn no_argument(
    command: &str,
    arg: &str,
    result: SpecialCommand,
) -> Result<SpecialCommand, CommandError> {
    if arg.is_empty() {
        Ok(result)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
    }
}

/// Display help information for special commands
///
/// # Examples
///
/// ```
/// use fridgechef::commands::special_commands::print_help;
///
/// print_help();
/// ```
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

PHOTOS:
  /upload <path>    - Attach a photo to your next message
  /attach <path>    - Same as /upload
  /camera           - Turn the camera for this panel on or off
  /capture <path>   - Take a photo (camera must be on)

RECIPES:
  /recipes [path]   - List ingredients and suggest recipes from a photo
  /generate [path]  - Same as /recipes

QUICK ACTIONS:
  /quick ideas      - Give me some quick recipe ideas for dinner
  /quick healthy    - What are some healthy meal options?
  /quick meals      - What are some meals I can make in under 30 minutes?

PANELS:
  /panel <name>     - Switch to chat, recipes, ingredients or about
  /about            - Show information about FridgeChef

SESSION:
  /clear            - Clear the conversation and attached photo
  /status           - Show panel, camera and conversation status
  /help             - Show this help message
  /?                - Same as /help

SESSION CONTROL:
  exit              - Exit interactive mode
  quit              - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the cooking assistant
  - Empty lines are ignored; use /recipes to send an attached photo on its own
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_regular_text() {
        assert_eq!(
            parse_special_command("How do I poach an egg?").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_parse_blank_line_sends_nothing() {
        assert_eq!(parse_special_command("").unwrap(), SpecialCommand::Blank);
        assert_eq!(parse_special_command("   \t").unwrap(), SpecialCommand::Blank);
    }

    #[test]
    fn test_parse_exit_and_quit() {
        assert_eq!(parse_special_command("exit").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("QUIT").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("/quit").unwrap(), SpecialCommand::Exit);
    }

    #[test]
    fn test_parse_upload_keeps_path_case() {
        assert_eq!(
            parse_special_command("/UPLOAD ~/Photos/Fridge.JPG").unwrap(),
            SpecialCommand::Upload(PathBuf::from("~/Photos/Fridge.JPG"))
        );
    }

    #[test]
    fn test_parse_upload_missing_path() {
        let result = parse_special_command("/upload");
        if let Err(CommandError::MissingArgument { command, usage }) = result {
            assert_eq!(command, "/upload");
            assert_eq!(usage, "/upload <path>");
        } else {
            panic!("Expected MissingArgument, got {:?}", result);
        }
    }

    #[test]
    fn test_parse_camera_and_capture() {
        assert_eq!(
            parse_special_command("/camera").unwrap(),
            SpecialCommand::ToggleCamera
        );
        assert_eq!(
            parse_special_command("/capture frame.png").unwrap(),
            SpecialCommand::Capture(PathBuf::from("frame.png"))
        );
        assert!(parse_special_command("/camera on").is_err());
    }

    #[test]
    fn test_parse_recipes_with_and_without_path() {
        assert_eq!(
            parse_special_command("/recipes").unwrap(),
            SpecialCommand::Recipes(None)
        );
        assert_eq!(
            parse_special_command("/generate shelf.jpg").unwrap(),
            SpecialCommand::Recipes(Some(PathBuf::from("shelf.jpg")))
        );
    }

    #[test]
    fn test_parse_quick_actions() {
        assert_eq!(
            parse_special_command("/quick ideas").unwrap(),
            SpecialCommand::Quick(QuickAction::RecipeIdeas)
        );
        assert_eq!(
            parse_special_command("/quick Healthy").unwrap(),
            SpecialCommand::Quick(QuickAction::HealthyOptions)
        );
        assert_eq!(
            parse_special_command("/quick meals").unwrap(),
            SpecialCommand::Quick(QuickAction::QuickMeals)
        );
    }

    #[test]
    fn test_parse_quick_invalid() {
        let result = parse_special_command("/quick dessert");
        if let Err(CommandError::UnsupportedArgument { command, arg }) = result {
            assert_eq!(command, "/quick");
            assert_eq!(arg, "dessert");
        } else {
            panic!("Expected UnsupportedArgument, got {:?}", result);
        }
        assert!(matches!(
            parse_special_command("/quick"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_panel_switch() {
        assert_eq!(
            parse_special_command("/panel ingredients").unwrap(),
            SpecialCommand::SwitchPanel(Panel::Ingredients)
        );
        assert!(matches!(
            parse_special_command("/panel pantry"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(parse_special_command("/clear").unwrap(), SpecialCommand::Clear);
        assert_eq!(parse_special_command("/about").unwrap(), SpecialCommand::About);
        assert_eq!(
            parse_special_command("/STATUS").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_parse_unknown_command() {
        let result = parse_special_command("/bake bread");
        assert_eq!(
            result,
            Err(CommandError::UnknownCommand("/bake".to_string()))
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Type '/help' to see available commands"));
    }
}
