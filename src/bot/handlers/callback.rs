use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::commands::list::{cancel_keyboard, render_reminder_list};
use crate::bot::handlers::HandlerResult;
use crate::models::ReminderId;
use crate::services::reminder::ReminderScheduler;

const CANCEL_PREFIX: &str = "cancel:";

pub fn cancel_callback_data(id: ReminderId) -> String {
    format!("{CANCEL_PREFIX}{id}")
}

/// Reminder id carried by a `cancel:<id>` button, if `data` is one.
pub fn parse_cancel_callback(data: &str) -> Option<ReminderId> {
    data.strip_prefix(CANCEL_PREFIX)?
        .parse()
        .ok()
        .filter(|id| *id > 0)
}

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    reminders: ReminderScheduler,
) -> HandlerResult {
    let user_id = q.from.id.0;
    let username = q.from.username.as_deref().unwrap_or("unknown");
    let data = q.data.as_deref().unwrap_or_default();
    tracing::info!("Callback received: '{}' from user {} ({})", data, username, user_id);

    let Some(id) = parse_cancel_callback(data) else {
        bot.answer_callback_query(q.id.clone())
            .text("Unknown action")
            .await?;
        return Ok(());
    };

    // The presser must own the reminder, whoever sent the list.
    let owner_id = user_id.to_string();
    if !reminders.cancel_reminder(id, &owner_id) {
        bot.answer_callback_query(q.id.clone())
            .text(format!("Reminder #{id} not found or already delivered"))
            .await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id.clone())
        .text(format!("✅ Reminder #{id} cancelled"))
        .await?;

    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };

    let remaining = reminders.get_user_reminders(&owner_id);
    let edit = if remaining.is_empty() {
        bot.edit_message_text(message.chat.id, message.id, "✅ No active reminders left\\.")
            .parse_mode(ParseMode::MarkdownV2)
            .await
    } else {
        bot.edit_message_text(
            message.chat.id,
            message.id,
            render_reminder_list(&remaining, reminders.now(), &reminders.timezone()),
        )
        .reply_markup(cancel_keyboard(&remaining))
        .parse_mode(ParseMode::MarkdownV2)
        .await
    };

    if let Err(e) = edit {
        tracing::warn!("Cancelled reminder {} but could not refresh the list: {}", id, e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_callback_round_trip() {
        assert_eq!(cancel_callback_data(42), "cancel:42");
        assert_eq!(parse_cancel_callback("cancel:42"), Some(42));
    }

    #[test]
    fn test_rejects_foreign_callback_data() {
        assert_eq!(parse_cancel_callback("cancel:"), None);
        assert_eq!(parse_cancel_callback("cancel:0"), None);
        assert_eq!(parse_cancel_callback("cancel:abc"), None);
        assert_eq!(parse_cancel_callback("snooze:4"), None);
        assert_eq!(parse_cancel_callback(""), None);
    }
}
