use anyhow::{anyhow, Result};

use crate::models::ReminderId;

/// Longest reminder text accepted from chat commands.
pub const MAX_REMINDER_MESSAGE_LEN: usize = 1000;

pub fn validate_reminder_message(message: &str) -> Result<()> {
    let message = message.trim();

    if message.is_empty() {
        return Err(anyhow!("Reminder message cannot be empty"));
    }

    if message.chars().count() > MAX_REMINDER_MESSAGE_LEN {
        return Err(anyhow!(
            "Reminder message cannot be longer than {} characters",
            MAX_REMINDER_MESSAGE_LEN
        ));
    }

    Ok(())
}

/// Parses a reminder id as typed by users, accepting an optional leading `#`.
pub fn parse_reminder_id(input: &str) -> Result<ReminderId> {
    let input = input.trim();
    let digits = input.strip_prefix('#').unwrap_or(input);

    if digits.is_empty() {
        return Err(anyhow!("Reminder ID cannot be empty"));
    }

    let id: ReminderId = digits
        .parse()
        .map_err(|_| anyhow!("Reminder ID must be a positive number"))?;

    if id == 0 {
        return Err(anyhow!("Reminder ID must be a positive number"));
    }

    Ok(id)
}

/// Largest positive chat id: Telegram guarantees ids fit in 52 bits.
const MAX_USER_CHAT_ID: i64 = (1 << 52) - 1;

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    // Telegram chat IDs should be non-zero
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }

    // User ids have grown past 32 bits
    if chat_id > MAX_USER_CHAT_ID {
        return Err(anyhow!("Invalid user chat ID range"));
    }

    // Supergroups sit around -100xxxxxxxxxx
    if chat_id < -2000000000000 {
        return Err(anyhow!("Chat ID out of valid range"));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reminder_message_valid() {
        assert!(validate_reminder_message("Buy milk").is_ok());
        assert!(validate_reminder_message("  Trimmed message  ").is_ok());
        assert!(validate_reminder_message("Line one\nline two").is_ok());
        assert!(validate_reminder_message(&"a".repeat(MAX_REMINDER_MESSAGE_LEN)).is_ok());
    }

    #[test]
    fn test_validate_reminder_message_invalid() {
        assert!(validate_reminder_message("").is_err());
        assert!(validate_reminder_message(" \t\n").is_err());
        assert!(validate_reminder_message(&"a".repeat(MAX_REMINDER_MESSAGE_LEN + 1)).is_err());
    }

    #[test]
    fn test_parse_reminder_id() {
        assert_eq!(parse_reminder_id("3").unwrap(), 3);
        assert_eq!(parse_reminder_id(" #42 ").unwrap(), 42);
        assert!(parse_reminder_id("").is_err());
        assert!(parse_reminder_id("#").is_err());
        assert!(parse_reminder_id("0").is_err());
        assert!(parse_reminder_id("-1").is_err());
        assert!(parse_reminder_id("abc").is_err());
    }

    #[test]
    fn test_validate_telegram_chat_id_valid() {
        assert!(validate_telegram_chat_id(12345).is_ok());
        assert!(validate_telegram_chat_id(-987654321).is_ok());
        assert!(validate_telegram_chat_id(-1001234567890).is_ok());
        assert!(validate_telegram_chat_id(6123456789).is_ok());
        assert!(validate_telegram_chat_id((1 << 52) - 1).is_ok());
    }

    #[test]
    fn test_validate_telegram_chat_id_invalid() {
        assert!(validate_telegram_chat_id(0).is_err());
        assert!(validate_telegram_chat_id(-3000000000000).is_err());
        assert!(validate_telegram_chat_id(1 << 52).is_err());
    }
}
