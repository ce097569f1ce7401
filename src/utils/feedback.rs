use teloxide::prelude::*;
use teloxide::types::ParseMode;
use crate::utils::markdown::escape_markdown;

/// Feedback types for different command outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Success,
    Warning,
    Error,
    Info,
}

impl FeedbackType {
    pub fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
        }
    }
}

/// Renders a plain-text feedback message as escaped MarkdownV2.
pub fn format_feedback(feedback_type: FeedbackType, message: &str) -> String {
    format!("{} {}", feedback_type.emoji(), escape_markdown(message))
}

/// Renders an error together with a hint for fixing it.
pub fn format_validation_error(error: &str, suggestion: &str) -> String {
    format!(
        "{} {}\n\n💡 *Suggestion:* {}",
        FeedbackType::Error.emoji(),
        escape_markdown(error),
        escape_markdown(suggestion)
    )
}

/// Centralized feedback system for bot commands
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    /// Send immediate feedback message
    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> ResponseResult<Message> {
        self.send_markdown(format_feedback(feedback_type, message)).await
    }

    async fn send_markdown(&self, text: String) -> ResponseResult<Message> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
    }

    /// Send success feedback
    pub async fn success(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Success, message).await
    }

    /// Send error feedback
    pub async fn error(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Error, message).await
    }

    /// Send info feedback
    pub async fn info(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Info, message).await
    }

    /// Send validation error with helpful suggestion
    pub async fn validation_error(&self, error: &str, suggestion: &str) -> ResponseResult<Message> {
        self.send_markdown(format_validation_error(error, suggestion)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_type_emojis() {
        assert_eq!(FeedbackType::Success.emoji(), "✅");
        assert_eq!(FeedbackType::Warning.emoji(), "⚠️");
        assert_eq!(FeedbackType::Error.emoji(), "❌");
        assert_eq!(FeedbackType::Info.emoji(), "ℹ️");
    }

    #[test]
    fn test_format_feedback_escapes_message() {
        assert_eq!(
            format_feedback(FeedbackType::Success, "Reminder #3 cancelled."),
            "✅ Reminder \\#3 cancelled\\."
        );
    }

    #[test]
    fn test_format_validation_error() {
        let text = format_validation_error("Invalid time format", "Try 30m or 5pm.");
        assert!(text.starts_with("❌ Invalid time format"));
        assert!(text.ends_with("💡 *Suggestion:* Try 30m or 5pm\\."));
    }
}
