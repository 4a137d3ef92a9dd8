//! Panel types and utilities
//!
//! The application is organised into panels:
//! - Chat: free-form conversation with the cooking assistant
//! - Recipes: photo-driven recipe generation
//! - Ingredients: chat grounded in a photo of your ingredients
//! - About: static information
//!
//! The three interactive panels share the same shape: text input, image
//! upload, a camera, and a clear action.

use colored::Colorize;
use std::fmt;

/// A logical sub-view of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Conversational cooking assistant
    Chat,

    /// Recipe generation from an uploaded or captured photo
    Recipes,

    /// Image-grounded chat about your ingredients
    Ingredients,

    /// Static information panel
    About,
}

impl Panel {
    /// Panels that accept user input and own a camera
    pub const INTERACTIVE: [Panel; 3] = [Panel::Chat, Panel::Recipes, Panel::Ingredients];

    /// Parse a panel from a string
    ///
    /// # Arguments
    ///
    /// * `s` - Panel name ("chat", "recipes", "ingredients" or "about")
    ///
    /// # Returns
    ///
    /// Returns the parsed Panel or an error if the string is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use fridgechef::panel::Panel;
    ///
    /// assert_eq!(Panel::parse_str("recipes").unwrap(), Panel::Recipes);
    /// assert_eq!(Panel::parse_str("Generator").unwrap(), Panel::Recipes);
    /// assert!(Panel::parse_str("dessert").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "chat" | "assistant" => Ok(Self::Chat),
            "recipes" | "recipe" | "generator" => Ok(Self::Recipes),
            "ingredients" | "ingredient" => Ok(Self::Ingredients),
            "about" => Ok(Self::About),
            other => Err(format!("Unknown panel: {}", other)),
        }
    }

    /// Whether this panel takes input and owns a camera
    pub fn is_interactive(&self) -> bool {
        !matches!(self, Self::About)
    }

    /// Get a user-friendly description of this panel
    pub fn description(&self) -> &'static str {
        match self {
            Self::Chat => "Ask questions, get recipe advice, or share a photo",
            Self::Recipes => "Upload or capture a photo of your fridge and get recipe ideas",
            Self::Ingredients => "Ask questions about the ingredients in a photo",
            Self::About => "About FridgeChef",
        }
    }

    /// Get a colored tag representation of this panel
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use fridgechef::panel::Panel;
    ///
    /// println!("{}", Panel::Recipes.colored_tag()); // "[RECIPES]" in green
    /// ```
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Chat => format!("[{}]", "CHAT".cyan()),
            Self::Recipes => format!("[{}]", "RECIPES".green()),
            Self::Ingredients => format!("[{}]", "INGREDIENTS".purple()),
            Self::About => format!("[{}]", "ABOUT".white()),
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chat => write!(f, "chat"),
            Self::Recipes => write!(f, "recipes"),
            Self::Ingredients => write!(f, "ingredients"),
            Self::About => write!(f, "about"),
        }
    }
}

/// Text of the static About panel
pub fn about_text() -> &'static str {
    r#"FridgeChef - your smart kitchen companion

This recipe assistant helps you:

  * Chat with AI: get cooking advice, recipe suggestions, and culinary tips
  * Image analysis: share photos of your ingredients for personalised recipe ideas
  * Camera capture: take a photo and analyse it straight away
  * Recipe generation: complete recipes with ingredients and steps

How to use:

  1. Chat: have a conversation with your cooking assistant
  2. Recipes: share a photo of your fridge or ingredients for recipe suggestions
  3. Ingredients: ask questions about what is in a photo

Quick actions give you canned questions for recipe ideas, healthy options and
meals under 30 minutes. Clearing a panel resets the conversation.

Photos are sent to the configured multimodal model (Google Gemini by default,
or a local Ollama vision model). Nothing is stored once the session ends."#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_parse_aliases() {
        assert_eq!(Panel::parse_str("chat").unwrap(), Panel::Chat);
        assert_eq!(Panel::parse_str("  CHAT ").unwrap(), Panel::Chat);
        assert_eq!(Panel::parse_str("recipe").unwrap(), Panel::Recipes);
        assert_eq!(Panel::parse_str("ingredients").unwrap(), Panel::Ingredients);
        assert_eq!(Panel::parse_str("about").unwrap(), Panel::About);
    }

    #[test]
    fn test_panel_parse_invalid() {
        let err = Panel::parse_str("dessert").unwrap_err();
        assert!(err.contains("dessert"));
    }

    #[test]
    fn test_panel_display_round_trips_through_parse() {
        for panel in [Panel::Chat, Panel::Recipes, Panel::Ingredients, Panel::About] {
            assert_eq!(Panel::parse_str(&panel.to_string()).unwrap(), panel);
        }
    }

    #[test]
    fn test_only_about_is_static() {
        assert!(Panel::INTERACTIVE.iter().all(|p| p.is_interactive()));
        assert!(!Panel::About.is_interactive());
    }

    #[test]
    fn test_about_text_mentions_features() {
        let text = about_text();
        assert!(text.contains("Recipe generation"));
        assert!(text.contains("Quick actions"));
    }
}
