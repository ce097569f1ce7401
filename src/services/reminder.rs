//! In-memory reminder registry.
//!
//! Every pending reminder owns one Tokio task that sleeps until the reminder is
//! due, marks it completed, hands it to the notification callback and finally
//! purges it after [`GRACE_PERIOD_HOURS`]. Registry and timer table share one
//! mutex, so a fire and a cancel on the same id never both succeed.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::models::{Platform, Reminder, ReminderId, ReminderStats};
use crate::services::clock::{Clock, SystemClock};
use crate::utils::datetime::{format_time_until, LocalZone};
use crate::utils::logging::log_reminder_event;

/// How long a completed reminder stays visible before it is purged.
pub const GRACE_PERIOD_HOURS: i64 = 24;

pub type NotifyFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;
pub type NotificationCallback = Arc<dyn Fn(Reminder) -> NotifyFuture + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("Invalid time format. Try: \"5m\", \"2h\", \"tomorrow\", \"5pm\", etc.")]
    InvalidTimeFormat,
    #[error("Reminder time must be in the future")]
    TimeInPast,
    #[error("Reminder message cannot be empty")]
    EmptyMessage,
}

/// A freshly stored reminder and how far away it is.
#[derive(Debug, Clone)]
pub struct CreatedReminder {
    pub reminder: Reminder,
    pub time_until: String,
}

struct Registry {
    reminders: HashMap<ReminderId, Reminder>,
    timers: HashMap<ReminderId, JoinHandle<()>>,
    last_id: ReminderId,
}

struct Shared {
    registry: Mutex<Registry>,
    callback: RwLock<Option<NotificationCallback>>,
    clock: Arc<dyn Clock>,
    timezone: LocalZone,
    grace_period: Duration,
}

impl Shared {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn callback(&self) -> Option<NotificationCallback> {
        self.callback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Handle to the reminder registry. Cloning shares the same registry.
///
/// Creating reminders spawns timer tasks, so it must happen inside a Tokio runtime.
#[derive(Clone)]
pub struct ReminderScheduler {
    shared: Arc<Shared>,
}

impl ReminderScheduler {
    pub fn new(timezone: impl Into<LocalZone>) -> Self {
        Self::with_clock(timezone, Arc::new(SystemClock))
    }

    pub fn with_clock(timezone: impl Into<LocalZone>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: Mutex::new(Registry {
                    reminders: HashMap::new(),
                    timers: HashMap::new(),
                    last_id: 0,
                }),
                callback: RwLock::new(None),
                clock,
                timezone: timezone.into(),
                grace_period: Duration::hours(GRACE_PERIOD_HOURS),
            }),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.shared.clock.now()
    }

    /// Zone used for clock times, named phrases and display.
    pub fn timezone(&self) -> LocalZone {
        self.shared.timezone
    }

    /// Registers the function invoked when a reminder falls due.
    ///
    /// Only one callback is kept; registering again replaces the previous one.
    pub fn set_notification_callback<F, Fut>(&self, callback: F)
    where
        F: Fn(Reminder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let callback: NotificationCallback = Arc::new(move |reminder| Box::pin(callback(reminder)));
        *self
            .shared
            .callback
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(callback);
    }

    /// Resolves `input` against the scheduler's clock and timezone.
    pub fn parse_time(&self, input: &str) -> Option<DateTime<Utc>> {
        self.parse_time_at(input, self.now())
    }

    fn parse_time_at(&self, input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.shared.timezone.parse_time(input, now)
    }

    pub fn create_reminder(
        &self,
        owner_id: &str,
        message: &str,
        time: &str,
        platform: Platform,
        destination: &str,
    ) -> Result<CreatedReminder, ReminderError> {
        let now = self.now();
        let due_at = self
            .parse_time_at(time, now)
            .ok_or(ReminderError::InvalidTimeFormat)?;
        if due_at <= now {
            return Err(ReminderError::TimeInPast);
        }

        let message = message.trim();
        if message.is_empty() {
            return Err(ReminderError::EmptyMessage);
        }

        let reminder = {
            let mut registry = self.shared.registry();
            registry.last_id += 1;
            let reminder = Reminder {
                id: registry.last_id,
                owner_id: owner_id.to_string(),
                message: message.to_string(),
                due_at,
                platform,
                destination: destination.to_string(),
                created_at: now,
                completed: false,
            };
            registry.reminders.insert(reminder.id, reminder.clone());

            // Spawned under the lock so the task cannot observe the registry
            // before its handle is recorded.
            let timer = tokio::spawn(run_timer(Arc::downgrade(&self.shared), reminder.id, due_at));
            registry.timers.insert(reminder.id, timer);
            reminder
        };

        log_reminder_event(
            "created",
            reminder.id,
            &reminder.owner_id,
            Some(&format!("due {} on {}", reminder.due_at.to_rfc3339(), reminder.platform)),
        );

        Ok(CreatedReminder {
            time_until: format_time_until(due_at, now),
            reminder,
        })
    }

    /// Owner's pending reminders, soonest first.
    pub fn get_user_reminders(&self, owner_id: &str) -> Vec<Reminder> {
        let registry = self.shared.registry();
        let mut reminders: Vec<Reminder> = registry
            .reminders
            .values()
            .filter(|reminder| !reminder.completed && reminder.is_owned_by(owner_id))
            .cloned()
            .collect();
        reminders.sort_by_key(|reminder| (reminder.due_at, reminder.id));
        reminders
    }

    pub fn get_reminder(&self, id: ReminderId) -> Option<Reminder> {
        self.shared.registry().reminders.get(&id).cloned()
    }

    /// Cancels a pending reminder.
    ///
    /// Returns `false` when the reminder does not exist, belongs to someone
    /// else or has already fired; callers cannot tell these apart.
    pub fn cancel_reminder(&self, id: ReminderId, owner_id: &str) -> bool {
        {
            let mut registry = self.shared.registry();
            let cancellable = registry
                .reminders
                .get(&id)
                .is_some_and(|reminder| !reminder.completed && reminder.is_owned_by(owner_id));
            if !cancellable {
                return false;
            }

            registry.reminders.remove(&id);
            if let Some(timer) = registry.timers.remove(&id) {
                timer.abort();
            }
        }

        log_reminder_event("cancelled", id, owner_id, None);
        true
    }

    /// Drops completed reminders whose due time is older than the grace window.
    pub fn sweep_completed(&self) -> usize {
        let cutoff = self.now() - self.shared.grace_period;
        let mut registry = self.shared.registry();
        let before = registry.reminders.len();
        registry.reminders.retain(|_, reminder| !reminder.is_stale(cutoff));
        before - registry.reminders.len()
    }

    pub fn stats(&self) -> ReminderStats {
        let registry = self.shared.registry();
        let completed_reminders = registry
            .reminders
            .values()
            .filter(|reminder| reminder.completed)
            .count();

        ReminderStats {
            total_reminders: registry.reminders.len(),
            active_reminders: registry.reminders.len() - completed_reminders,
            completed_reminders,
            scheduled_timers: registry.timers.len(),
        }
    }

    /// Aborts every pending timer. Reminders stay listed but will not fire.
    pub fn shutdown(&self) -> usize {
        let mut registry = self.shared.registry();
        let aborted = registry.timers.len();
        for (_, timer) in registry.timers.drain() {
            timer.abort();
        }
        aborted
    }
}

async fn run_timer(shared: Weak<Shared>, id: ReminderId, due_at: DateTime<Utc>) {
    // The clock is re-read after every sleep so the reminder never fires early.
    loop {
        let Some(strong) = shared.upgrade() else {
            return;
        };
        let remaining = due_at.signed_duration_since(strong.clock.now());
        drop(strong);

        match remaining.to_std() {
            Ok(wait) if !wait.is_zero() => tokio::time::sleep(wait).await,
            _ => break,
        }
    }

    trigger_reminder(shared, id).await;
}

async fn trigger_reminder(shared: Weak<Shared>, id: ReminderId) {
    let Some(strong) = shared.upgrade() else {
        return;
    };

    // `run_timer` has already observed the due time.
    let fired = {
        let mut registry = strong.registry();
        registry.timers.remove(&id);
        match registry.reminders.get_mut(&id) {
            Some(reminder) if !reminder.completed => {
                reminder.completed = true;
                Some(reminder.clone())
            }
            _ => None,
        }
    };
    let Some(reminder) = fired else {
        return;
    };

    let callback = strong.callback();
    let grace_period = strong.grace_period;
    drop(strong);

    match callback {
        // Run in its own task so a panicking callback is contained too.
        Some(callback) => match tokio::spawn(callback(reminder.clone())).await {
            Ok(Ok(())) => log_reminder_event("triggered", id, &reminder.owner_id, None),
            Ok(Err(e)) => tracing::error!("Error triggering reminder {}: {:#}", id, e),
            Err(e) => tracing::error!("Notification callback for reminder {} aborted: {}", id, e),
        },
        None => tracing::warn!(
            "Reminder {} fired for user {} but no notification callback is registered",
            id,
            reminder.owner_id
        ),
    }

    if let Ok(wait) = grace_period.to_std() {
        tokio::time::sleep(wait).await;
    }

    let Some(strong) = shared.upgrade() else {
        return;
    };
    let mut registry = strong.registry();
    if registry.reminders.get(&id).is_some_and(|reminder| reminder.completed) {
        registry.reminders.remove(&id);
        tracing::debug!("Purged completed reminder {}", id);
    }
}
