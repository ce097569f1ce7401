/// Time expression parsing and display formatting
pub mod datetime;
/// User-facing command feedback messages
pub mod feedback;
/// Consistent log line helpers
pub mod logging;
/// Telegram MarkdownV2 helpers
pub mod markdown;
/// Input validation for command arguments
pub mod validation;
