use reminder_bot::bot::commands::Command;
use teloxide::utils::command::BotCommands;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod command_parsing_tests {
    use super::*;

    fn parse(input: &str) -> Command {
        Command::parse(input, "testbot").unwrap()
    }

    fn remind(time: &str, message: &str) -> Command {
        Command::Remind {
            time: time.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_unit_commands_parsing() {
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/start"), Command::Start);
        assert_eq!(parse("/reminders"), Command::Reminders);
        assert_eq!(parse("/stats"), Command::Stats);
    }

    #[test]
    fn test_command_with_bot_mention() {
        assert_eq!(parse("/reminders@testbot"), Command::Reminders);
        assert_eq!(parse("/remind@testbot 30m Stretch"), remind("30m", "Stretch"));
    }

    #[test]
    fn test_remind_single_token_times() {
        assert_eq!(parse("/remind 30m Buy groceries"), remind("30m", "Buy groceries"));
        assert_eq!(parse("/remind 5pm Call mom"), remind("5pm", "Call mom"));
        assert_eq!(parse("/remind 14:30 Dentist"), remind("14:30", "Dentist"));
        assert_eq!(parse("/remind tomorrow Team standup"), remind("tomorrow", "Team standup"));
        assert_eq!(parse("/remind 2026-12-24 Wrap presents"), remind("2026-12-24", "Wrap presents"));
    }

    #[test]
    fn test_remind_two_token_times() {
        assert_eq!(parse("/remind 5 min Take a break"), remind("5 min", "Take a break"));
        assert_eq!(parse("/remind 2 hours Check oven"), remind("2 hours", "Check oven"));
        assert_eq!(parse("/remind 9:30 am Standup"), remind("9:30 am", "Standup"));
        assert_eq!(parse("/remind 5 pm Call mom"), remind("5 pm", "Call mom"));
        assert_eq!(parse("/remind next week Renew passport"), remind("next week", "Renew passport"));
        assert_eq!(parse("/remind 2026-12-24 18:00 Dinner"), remind("2026-12-24 18:00", "Dinner"));
    }

    #[test]
    fn test_remind_keeps_message_text() {
        assert_eq!(
            parse("/remind 1h Pay rent: $1,200 (don't forget!)"),
            remind("1h", "Pay rent: $1,200 (don't forget!)")
        );
    }

    #[test]
    fn test_remind_requires_time_and_message() {
        assert!(Command::parse("/remind", "testbot").is_err());
        assert!(Command::parse("/remind 30m", "testbot").is_err());
        assert!(Command::parse("/remind next week", "testbot").is_err());
    }

    #[test]
    fn test_cancel_parsing() {
        assert_eq!(parse("/cancel 3"), Command::Cancel { id: 3 });
        assert_eq!(parse("/cancel #12"), Command::Cancel { id: 12 });
    }

    #[test]
    fn test_cancel_rejects_bad_ids() {
        assert!(Command::parse("/cancel", "testbot").is_err());
        assert!(Command::parse("/cancel abc", "testbot").is_err());
        assert!(Command::parse("/cancel 0", "testbot").is_err());
        assert!(Command::parse("/cancel -4", "testbot").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(Command::parse("/snooze 5", "testbot").is_err());
        assert!(Command::parse("/schedule", "testbot").is_err());
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for command in ["/help", "/start", "/remind", "/reminders", "/cancel", "/stats"] {
            assert!(descriptions.contains(command), "missing {command}");
        }
    }
}
