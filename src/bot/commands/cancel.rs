use teloxide::prelude::*;

use crate::bot::commands::sender_identity;
use crate::models::ReminderId;
use crate::services::reminder::ReminderScheduler;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

pub async fn handle_cancel(
    bot: Bot,
    msg: Message,
    id: ReminderId,
    reminders: &ReminderScheduler,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot, msg.chat.id);
    let chat_id = msg.chat.id.0;

    let Some(user) = msg.from() else {
        feedback.error("Reminders can only be cancelled by their owner.").await?;
        return Ok(());
    };
    let (user_id, username) = sender_identity(user);
    log_command_start("cancel", username, user_id, chat_id, Some(&format!("#{id}")));

    if reminders.cancel_reminder(id, &user_id.to_string()) {
        feedback.success(&format!("Reminder #{id} cancelled.")).await?;
        log_command_success("cancel", username, user_id, chat_id, Some(&format!("#{id}")));
    } else {
        log_command_error("cancel", username, user_id, chat_id, &format!("reminder #{id} not cancellable"));
        feedback
            .validation_error(
                &format!("Reminder #{id} not found or already delivered"),
                "Use /reminders to see your active reminders and their IDs.",
            )
            .await?;
    }

    Ok(())
}
