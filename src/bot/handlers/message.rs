use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::{cancel, list, remind, stats, Command};
use crate::bot::handlers::HandlerResult;
use crate::services::reminder::ReminderScheduler;

pub const WELCOME_TEXT: &str = "⏰ Welcome to Reminder Bot!\n\n\
Tell me when and what, and I'll remind you:\n\
• /remind 30m Take a break\n\
• /remind 5pm Call mom\n\
• /remind tomorrow Standup notes\n\n\
Use /reminders to see what's pending and /help for all commands.";

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    reminders: ReminderScheduler,
) -> HandlerResult {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, help_text()).await?;
        }
        Command::Start => {
            bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
        }
        Command::Remind { time, message } => {
            remind::handle_remind(bot, msg, time, message, &reminders).await?;
        }
        Command::Reminders => {
            list::handle_reminders(bot, msg, &reminders).await?;
        }
        Command::Cancel { id } => {
            cancel::handle_cancel(bot, msg, id, &reminders).await?;
        }
        Command::Stats => {
            stats::handle_stats(bot, msg, &reminders).await?;
        }
    }
    Ok(())
}

/// Command list followed by the accepted time formats.
pub fn help_text() -> String {
    format!(
        "{}\n\n\
        Time formats:\n\
        • Relative: 30m, 2h, 3d, 1w, 5 min, 2 hours\n\
        • Clock: 5pm, 9:30 am, 14:30\n\
        • Phrases: tomorrow, tonight, next week\n\
        • Dates: 2026-12-24 18:00",
        Command::descriptions()
    )
}
