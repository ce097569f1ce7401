use teloxide::prelude::*;

use crate::bot::handlers::HandlerResult;
use crate::utils::feedback::CommandFeedback;

/// Reply for a message that did not parse as a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    Usage { error: String, suggestion: String },
    Info(String),
}

pub async fn handle_general_message(bot: Bot, msg: Message) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let feedback = CommandFeedback::new(bot, msg.chat.id);
    match hint_for(text) {
        Some(Hint::Usage { error, suggestion }) => {
            feedback.validation_error(&error, &suggestion).await?;
        }
        Some(Hint::Info(message)) => {
            feedback.info(&message).await?;
        }
        // Other chatter gets no reply.
        None => {}
    }
    Ok(())
}

pub fn hint_for(text: &str) -> Option<Hint> {
    let text = text.trim();

    if let Some(command) = text.strip_prefix('/') {
        let name = command
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .split('@')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        let hint = match name.as_str() {
            "remind" => Hint::Usage {
                error: "Could not read that reminder".to_string(),
                suggestion: "Usage: /remind <time> <message>, e.g. /remind 30m Take a break or /remind 9:30 am Standup"
                    .to_string(),
            },
            "cancel" => Hint::Usage {
                error: "Missing or invalid reminder ID".to_string(),
                suggestion: "Usage: /cancel <id>, e.g. /cancel 3. Use /reminders to see your IDs."
                    .to_string(),
            },
            _ => Hint::Usage {
                error: format!("Unknown command: /{name}"),
                suggestion: "Use /help to see all available commands, or check your command syntax."
                    .to_string(),
            },
        };
        return Some(hint);
    }

    let lower = text.to_lowercase();
    if lower.contains("remind") {
        Some(Hint::Info(
            "Looking to set a reminder? Try:\n• /remind 30m Take a break\n• /remind tomorrow Call the bank\n• Use /help for more examples"
                .to_string(),
        ))
    } else if lower.contains("help") {
        Some(Hint::Info(
            "Use /help to see all available commands and examples!".to_string(),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_usage(hint: Option<Hint>, needle: &str) -> bool {
        matches!(hint, Some(Hint::Usage { suggestion, .. }) if suggestion.contains(needle))
    }

    #[test]
    fn test_malformed_known_commands_get_usage() {
        assert!(is_usage(hint_for("/remind"), "/remind <time> <message>"));
        assert!(is_usage(hint_for("/remind@reminder_bot 30m"), "/remind <time> <message>"));
        assert!(is_usage(hint_for("/cancel abc"), "/cancel <id>"));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            hint_for("/snooze 5"),
            Some(Hint::Usage {
                error: "Unknown command: /snooze".to_string(),
                suggestion: "Use /help to see all available commands, or check your command syntax."
                    .to_string(),
            })
        );
    }

    #[test]
    fn test_free_text() {
        assert!(matches!(hint_for("can you Remind me later?"), Some(Hint::Info(text)) if text.contains("/remind")));
        assert!(matches!(hint_for("help"), Some(Hint::Info(_))));
        assert_eq!(hint_for("good morning"), None);
    }
}
