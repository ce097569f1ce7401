use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::commands::sender_identity;
use crate::models::ReminderStats;
use crate::services::reminder::ReminderScheduler;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_start, log_command_success};

pub async fn handle_stats(
    bot: Bot,
    msg: Message,
    reminders: &ReminderScheduler,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    let Some(user) = msg.from() else {
        CommandFeedback::new(bot, msg.chat.id)
            .error("Statistics are only available to a known sender.")
            .await?;
        return Ok(());
    };
    let (user_id, username) = sender_identity(user);
    log_command_start("stats", username, user_id, chat_id, None);

    let own_active = reminders.get_user_reminders(&user_id.to_string()).len();
    bot.send_message(msg.chat.id, render_stats(&reminders.stats(), own_active))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    log_command_success("stats", username, user_id, chat_id, Some(&format!("{own_active} own active")));
    Ok(())
}

/// MarkdownV2 summary of the registry plus the caller's own active count.
pub fn render_stats(stats: &ReminderStats, own_active: usize) -> String {
    format!(
        "📊 *Reminder Statistics*\n\n\
        👤 *You:* {} active\n\n\
        🌐 *All users:*\n\
        • Total: {}\n\
        • Active: {}\n\
        • Delivered: {}\n\
        • Scheduled timers: {}",
        own_active,
        stats.total_reminders,
        stats.active_reminders,
        stats.completed_reminders,
        stats.scheduled_timers
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stats() {
        let stats = ReminderStats {
            total_reminders: 5,
            active_reminders: 3,
            completed_reminders: 2,
            scheduled_timers: 3,
        };

        let text = render_stats(&stats, 1);
        assert!(text.contains("*You:* 1 active"));
        assert!(text.contains("• Total: 5"));
        assert!(text.contains("• Active: 3"));
        assert!(text.contains("• Delivered: 2"));
        assert!(text.contains("• Scheduled timers: 3"));
    }
}
