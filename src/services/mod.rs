/// Hourly sweep of stale completed reminders
pub mod cleanup;
/// Time sources for the scheduler
pub mod clock;
/// HTTP keep-alive and health endpoints
pub mod health;
/// Delivery of due reminders to chat platforms
pub mod notifier;
/// Reminder registry and per-reminder timers
pub mod reminder;
