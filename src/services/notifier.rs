use anyhow::{anyhow, Result};
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::models::{Platform, Reminder};
use crate::utils::datetime::LocalZone;
use crate::utils::markdown::escape_markdown;
use crate::utils::validation::validate_telegram_chat_id;

/// Delivers due reminders through the Telegram Bot API.
///
/// Registered as the scheduler's notification callback in `main`.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    timezone: LocalZone,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, timezone: impl Into<LocalZone>) -> Self {
        Self {
            bot,
            timezone: timezone.into(),
        }
    }

    pub async fn deliver(&self, reminder: Reminder) -> Result<()> {
        if reminder.platform != Platform::Telegram {
            return Err(anyhow!(
                "No {} transport configured for reminder #{}",
                reminder.platform,
                reminder.id
            ));
        }

        let chat_id = parse_chat_id(&reminder.destination)?;
        self.bot
            .send_message(chat_id, render_notification(&reminder, &self.timezone))
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| anyhow!("Failed to send reminder #{} to chat {}: {}", reminder.id, chat_id.0, e))?;

        tracing::debug!("Delivered reminder #{} to chat {}", reminder.id, chat_id.0);
        Ok(())
    }
}

/// Telegram chat id stored in a reminder's destination.
pub fn parse_chat_id(destination: &str) -> Result<ChatId> {
    let raw: i64 = destination
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid Telegram chat id: '{}'", destination))?;
    validate_telegram_chat_id(raw)?;
    Ok(ChatId(raw))
}

/// MarkdownV2 body of a reminder notification.
pub fn render_notification(reminder: &Reminder, timezone: &LocalZone) -> String {
    format!(
        "⏰ *Reminder\\!*\n\n{}\n\n🕐 _Set for {}_\n🆔 Reminder \\#{}",
        escape_markdown(&reminder.message),
        escape_markdown(&timezone.format(&reminder.due_at)),
        reminder.id
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn reminder(platform: Platform, destination: &str) -> Reminder {
        let due_at = Utc.with_ymd_and_hms(2026, 10, 16, 15, 30, 0).unwrap();
        Reminder {
            id: 7,
            owner_id: "100".to_string(),
            message: "Take medication (2 pills).".to_string(),
            due_at,
            platform,
            destination: destination.to_string(),
            created_at: due_at - chrono::Duration::hours(1),
            completed: true,
        }
    }

    #[test]
    fn test_render_notification() {
        let text = render_notification(
            &reminder(Platform::Telegram, "-100123"),
            &LocalZone::Fixed(FixedOffset::east_opt(0).unwrap()),
        );
        assert!(text.starts_with("⏰ *Reminder\\!*"));
        assert!(text.contains("Take medication \\(2 pills\\)\\."));
        assert!(text.contains("Fri, Oct 16, 2026, 03:30 PM"));
        assert!(text.ends_with("Reminder \\#7"));
    }

    #[test]
    fn test_parse_chat_id() {
        assert_eq!(parse_chat_id("-1001234567890").unwrap(), ChatId(-1001234567890));
        assert_eq!(parse_chat_id(" 42 ").unwrap(), ChatId(42));
        assert!(parse_chat_id("general").is_err());
        assert!(parse_chat_id("0").is_err());
    }

    #[test]
    fn test_parse_ten_digit_user_chat_id() {
        assert_eq!(parse_chat_id("6123456789").unwrap(), ChatId(6123456789));
    }

    #[tokio::test]
    async fn test_discord_reminders_are_rejected() {
        let notifier = TelegramNotifier::new(
            Bot::new("123456:TEST"),
            FixedOffset::east_opt(0).unwrap(),
        );
        let err = notifier
            .deliver(reminder(Platform::Discord, "998877"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No discord transport"));
    }
}
