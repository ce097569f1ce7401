use chrono::{DateTime, Utc};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};

use crate::bot::commands::sender_identity;
use crate::bot::handlers::callback::cancel_callback_data;
use crate::models::Reminder;
use crate::services::reminder::ReminderScheduler;
use crate::utils::datetime::{format_time_until, LocalZone};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_start, log_command_success};
use crate::utils::markdown::{escape_markdown, truncate_with_ellipsis};

/// Reminders shown per `/reminders` reply.
pub const MAX_LISTED: usize = 10;
/// Characters of reminder text shown in the list.
pub const PREVIEW_CHARS: usize = 50;

pub async fn handle_reminders(
    bot: Bot,
    msg: Message,
    reminders: &ReminderScheduler,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    let Some(user) = msg.from() else {
        feedback.error("Reminders are listed per user account.").await?;
        return Ok(());
    };
    let (user_id, username) = sender_identity(user);
    log_command_start("reminders", username, user_id, chat_id, None);

    let active = reminders.get_user_reminders(&user_id.to_string());
    if active.is_empty() {
        feedback
            .info("You have no active reminders.\n\nCreate one with /remind 30m Take a break")
            .await?;
        return Ok(());
    }

    bot.send_message(
        msg.chat.id,
        render_reminder_list(&active, reminders.now(), &reminders.timezone()),
    )
    .reply_markup(cancel_keyboard(&active))
    .parse_mode(ParseMode::MarkdownV2)
    .await?;

    log_command_success(
        "reminders",
        username,
        user_id,
        chat_id,
        Some(&format!("{} active", active.len())),
    );
    Ok(())
}

/// MarkdownV2 listing of the first [`MAX_LISTED`] reminders.
pub fn render_reminder_list(
    reminders: &[Reminder],
    now: DateTime<Utc>,
    timezone: &LocalZone,
) -> String {
    let mut text = format!("📋 *Your Reminders* \\({}\\)\n\n", reminders.len());

    for reminder in reminders.iter().take(MAX_LISTED) {
        text.push_str(&format!(
            "*\\#{}* {}\n⏰ {} \\(in {}\\)\n\n",
            reminder.id,
            escape_markdown(&truncate_with_ellipsis(&reminder.message, PREVIEW_CHARS)),
            escape_markdown(&timezone.format(&reminder.due_at)),
            escape_markdown(&format_time_until(reminder.due_at, now)),
        ));
    }

    if reminders.len() > MAX_LISTED {
        text.push_str(&format!("_\\.\\.\\. and {} more_\n\n", reminders.len() - MAX_LISTED));
    }

    text.push_str("Tap a button below or send /cancel with the ID to cancel\\.");
    text
}

/// One cancel button per listed reminder.
pub fn cancel_keyboard(reminders: &[Reminder]) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = reminders
        .iter()
        .take(MAX_LISTED)
        .map(|reminder| {
            vec![InlineKeyboardButton::callback(
                format!("❌ Cancel #{}", reminder.id),
                cancel_callback_data(reminder.id),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}
