//! Rule-based replies used when the completion service is unreachable

use super::types::{ChatMessage, Role};

pub const STYLE_REPLY: &str = "I can help you adjust the color scheme and styling. What specific changes would you like to make?";
pub const LAYOUT_REPLY: &str = "I can help restructure the layout and components. What layout changes are you looking for?";
pub const EXPORT_REPLY: &str = "I can help you export your design. Which format would you prefer - React, Vue, or vanilla HTML/CSS?";
pub const GENERIC_REPLY: &str = "I understand your request. Let me help you improve your UI design. Could you be more specific about what you'd like to change?";

/// Pick a canned reply from the keywords of the last user message.
///
/// Pure and infallible: the same messages always produce the same text.
pub fn fallback_response(messages: &[ChatMessage]) -> String {
    let last = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .or_else(|| messages.last())
        .map(|m| m.content.as_str())
        .unwrap_or_default();

    let reply = if last.contains("color") || last.contains("style") {
        STYLE_REPLY
    } else if last.contains("layout") || last.contains("structure") {
        LAYOUT_REPLY
    } else if last.contains("export") || last.contains("download") {
        EXPORT_REPLY
    } else {
        GENERIC_REPLY
    };
    reply.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(text: &str) -> String {
        fallback_response(&[ChatMessage::system("sys"), ChatMessage::user(text)])
    }

    #[test]
    fn test_keyword_categories() {
        assert_eq!(ask("make the color warmer"), STYLE_REPLY);
        assert_eq!(ask("a bolder style please"), STYLE_REPLY);
        assert_eq!(ask("change the layout"), LAYOUT_REPLY);
        assert_eq!(ask("the page structure is off"), LAYOUT_REPLY);
        assert_eq!(ask("how do I download it"), EXPORT_REPLY);
        assert_eq!(ask("hello"), GENERIC_REPLY);
    }

    #[test]
    fn test_style_takes_priority_over_layout() {
        assert_eq!(ask("layout and color"), STYLE_REPLY);
    }

    #[test]
    fn test_scans_last_user_message_only() {
        let messages = vec![
            ChatMessage::system("You pick a color palette and a layout"),
            ChatMessage::user("hi there"),
        ];
        assert_eq!(fallback_response(&messages), GENERIC_REPLY);
    }

    #[test]
    fn test_empty_messages_give_generic_reply() {
        assert_eq!(fallback_response(&[]), GENERIC_REPLY);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(ask("export to react"), ask("export to react"));
    }
}
