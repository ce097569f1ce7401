pub mod cancel;
pub mod list;
pub mod remind;
pub mod stats;

use chrono::{NaiveDate, NaiveTime};
use teloxide::types::User;
use teloxide::utils::command::{BotCommands, ParseError};

use crate::models::ReminderId;
use crate::utils::datetime::is_duration_unit;
use crate::utils::validation::parse_reminder_id;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Reminder Bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(
        description = "Set a reminder, e.g. /remind 30m Buy groceries",
        parse_with = parse_remind_args
    )]
    Remind { time: String, message: String },
    #[command(description = "List your active reminders")]
    Reminders,
    #[command(description = "Cancel a reminder by its ID, e.g. /cancel 3", parse_with = parse_cancel_args)]
    Cancel { id: ReminderId },
    #[command(description = "Show reminder statistics")]
    Stats,
}

/// Splits `/remind` arguments into the time expression and the message.
pub fn parse_remind_args(input: String) -> Result<(String, String), ParseError> {
    split_time_and_message(&input).ok_or_else(|| ParseError::TooFewArguments {
        expected: 2,
        found: input.split_whitespace().count().min(1),
        message: "Usage: /remind <time> <message>".to_string(),
    })
}

pub fn parse_cancel_args(input: String) -> Result<(ReminderId,), ParseError> {
    parse_reminder_id(&input)
        .map(|id| (id,))
        .map_err(|e| ParseError::IncorrectFormat(e.into()))
}

/// The time expression is usually the first word, but may span two:
/// `5 min`, `9:30 pm`, `next week`, `2026-12-24 18:00`.
pub fn split_time_and_message(input: &str) -> Option<(String, String)> {
    let (first, after_first) = split_first_word(input)?;
    let (time, message) = match split_first_word(after_first) {
        Some((second, after_second)) if time_spans_two_words(first, second) => {
            (format!("{first} {second}"), after_second)
        }
        _ => (first.to_string(), after_first),
    };

    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    Some((time, message.to_string()))
}

fn split_first_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

fn time_spans_two_words(first: &str, second: &str) -> bool {
    let first = first.to_lowercase();
    let second = second.to_lowercase();

    if first == "next" && second == "week" {
        return true;
    }

    if is_date_then_clock(&first, &second) {
        return true;
    }

    let is_number = !first.is_empty() && first.chars().all(|c| c.is_ascii_digit());
    let is_clock = first.contains(':') && first.chars().all(|c| c.is_ascii_digit() || c == ':');
    let is_period = second == "am" || second == "pm";

    (is_number && (is_duration_unit(&second) || is_period)) || (is_clock && is_period)
}

/// Numeric id and display name used when logging a command.
pub fn sender_identity(user: &User) -> (u64, &str) {
    (user.id.0, user.username.as_deref().unwrap_or("unknown"))
}

fn is_date_then_clock(first: &str, second: &str) -> bool {
    NaiveDate::parse_from_str(first, "%Y-%m-%d").is_ok()
        && ["%H:%M", "%H:%M:%S"]
            .iter()
            .any(|format| NaiveTime::parse_from_str(second, format).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UserId;

    fn split(input: &str) -> Option<(String, String)> {
        split_time_and_message(input)
    }

    #[test]
    fn test_single_word_times() {
        assert_eq!(split("30m Buy milk"), Some(("30m".into(), "Buy milk".into())));
        assert_eq!(split("tomorrow Team sync"), Some(("tomorrow".into(), "Team sync".into())));
        assert_eq!(split("14:30 Dentist"), Some(("14:30".into(), "Dentist".into())));
    }

    #[test]
    fn test_two_word_times() {
        assert_eq!(split("5 min Stretch"), Some(("5 min".into(), "Stretch".into())));
        assert_eq!(split("9:30 pm Call mom"), Some(("9:30 pm".into(), "Call mom".into())));
        assert_eq!(split("5 PM Take meds"), Some(("5 PM".into(), "Take meds".into())));
        assert_eq!(split("Next Week Renew passport"), Some(("Next Week".into(), "Renew passport".into())));
    }

    #[test]
    fn test_date_with_clock_time() {
        assert_eq!(
            split("2026-12-24 18:00 Dinner"),
            Some(("2026-12-24 18:00".into(), "Dinner".into()))
        );
        assert_eq!(
            split("2026-12-24 18:00:30 Dinner"),
            Some(("2026-12-24 18:00:30".into(), "Dinner".into()))
        );
        assert_eq!(
            split("2026-12-24 Dinner at 18:00"),
            Some(("2026-12-24".into(), "Dinner at 18:00".into()))
        );
        assert_eq!(split("2026-12-24 18:00"), None);
    }

    #[test]
    fn test_number_followed_by_plain_word_is_one_token() {
        assert_eq!(split("5 apples"), Some(("5".into(), "apples".into())));
    }

    #[test]
    fn test_message_keeps_inner_whitespace() {
        assert_eq!(
            split("  2h   Line one\nLine two "),
            Some(("2h".into(), "Line one\nLine two".into()))
        );
    }

    fn user(username: Option<&str>) -> User {
        User {
            id: UserId(6123456789),
            is_bot: false,
            first_name: "Ada".to_string(),
            last_name: None,
            username: username.map(str::to_string),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn test_sender_identity() {
        assert_eq!(sender_identity(&user(Some("ada"))), (6123456789, "ada"));
        assert_eq!(sender_identity(&user(None)), (6123456789, "unknown"));
    }

    #[test]
    fn test_missing_message() {
        assert_eq!(split(""), None);
        assert_eq!(split("30m"), None);
        assert_eq!(split("next week"), None);
        assert_eq!(split("5 min   "), None);
    }
}
