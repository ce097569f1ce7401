use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::commands::sender_identity;
use crate::models::Platform;
use crate::services::reminder::{CreatedReminder, ReminderError, ReminderScheduler};
use crate::utils::datetime::LocalZone;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_start, log_command_success, log_validation_error};
use crate::utils::markdown::escape_markdown;
use crate::utils::validation::validate_reminder_message;

pub async fn handle_remind(
    bot: Bot,
    msg: Message,
    time: String,
    message: String,
    reminders: &ReminderScheduler,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);
    let chat_id = msg.chat.id.0;

    let Some(user) = msg.from() else {
        feedback.error("Reminders can only be set by a user account.").await?;
        return Ok(());
    };
    let (user_id, username) = sender_identity(user);
    log_command_start("remind", username, user_id, chat_id, Some(&time));

    if let Err(e) = validate_reminder_message(&message) {
        log_validation_error("remind", "message", &message, &e.to_string(), user_id, chat_id);
        feedback
            .validation_error(&e.to_string(), "Shorten the reminder text and try again.")
            .await?;
        return Ok(());
    }

    let created = match reminders.create_reminder(
        &user_id.to_string(),
        &message,
        &time,
        Platform::Telegram,
        &chat_id.to_string(),
    ) {
        Ok(created) => created,
        Err(e) => {
            log_validation_error("remind", "time", &time, &e.to_string(), user_id, chat_id);
            feedback.validation_error(&e.to_string(), suggestion_for(e)).await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, render_confirmation(&created, &reminders.timezone()))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    log_command_success(
        "remind",
        username,
        user_id,
        chat_id,
        Some(&format!("reminder #{} in {}", created.reminder.id, created.time_until)),
    );
    Ok(())
}

fn suggestion_for(error: ReminderError) -> &'static str {
    match error {
        ReminderError::InvalidTimeFormat => {
            "Examples: /remind 30m Stretch, /remind 5pm Call mom, /remind tomorrow Standup notes"
        }
        ReminderError::TimeInPast => "Pick a time later than now, for example /remind 2h Check the oven",
        ReminderError::EmptyMessage => "Usage: /remind <time> <message>",
    }
}

/// MarkdownV2 confirmation sent after a reminder is stored.
pub fn render_confirmation(created: &CreatedReminder, timezone: &LocalZone) -> String {
    let reminder = &created.reminder;
    format!(
        "✅ *Reminder set\\!*\n\n📝 {}\n⏰ {}\n⏳ In {}\n🆔 Reminder \\#{}\n\nCancel it with /cancel {}",
        escape_markdown(&reminder.message),
        escape_markdown(&timezone.format(&reminder.due_at)),
        escape_markdown(&created.time_until),
        reminder.id,
        reminder.id
    )
}
