use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequential reminder identifier, unique for the lifetime of the process.
pub type ReminderId = u64;

/// Chat platform that should receive a reminder's notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Telegram,
    Discord,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Telegram => "telegram",
            Platform::Discord => "discord",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "telegram" => Ok(Platform::Telegram),
            "discord" => Ok(Platform::Discord),
            other => Err(format!("Unknown platform: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub owner_id: String,
    pub message: String,
    pub due_at: DateTime<Utc>,
    pub platform: Platform,
    /// Chat or channel id on `platform`. Only the notification transport reads it.
    pub destination: String,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
}

impl Reminder {
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_at <= now
    }

    /// Completed reminders whose due time is older than `cutoff` are eligible for purge.
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.completed && self.due_at < cutoff
    }
}

/// Snapshot of the scheduler's registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderStats {
    pub total_reminders: usize,
    pub active_reminders: usize,
    pub completed_reminders: usize,
    pub scheduled_timers: usize,
}
