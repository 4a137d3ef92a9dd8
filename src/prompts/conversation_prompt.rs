//! Cooking assistant conversation prompt
//!
//! Wraps the user's literal message in a cooking-assistant instruction. When
//! a photo is attached the model is asked to ground its answer in it.

/// Generates the conversation instruction
///
/// # Arguments
///
/// * `message` - The user's message, quoted verbatim
/// * `with_image` - Whether a photo accompanies the message
///
/// # Examples
///
/// ```
/// use fridgechef::prompts::conversation_prompt::generate_conversation_prompt;
///
/// let prompt = generate_conversation_prompt("What goes with leeks?", false);
/// assert!(prompt.contains(r#"The user said: "What goes with leeks?""#));
/// ```
pub fn generate_conversation_prompt(message: &str, with_image: bool) -> String {
    let request = if with_image {
        "Please analyze this image and respond to their question. If they're asking about ingredients or recipes, \
provide helpful cooking advice, recipe suggestions, or ingredient information based on what you see in the image."
    } else {
        "Please provide helpful cooking advice, recipe suggestions, cooking tips, or answer any culinary questions they might have.
Be friendly and informative in your response."
    };

    format!(
        "You are a helpful cooking assistant. The user said: \"{}\"\n\n{}",
        message, request
    )
}
