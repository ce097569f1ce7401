use tokio_cron_scheduler::{Job, JobScheduler};

use crate::services::reminder::ReminderScheduler;
use crate::utils::logging::log_maintenance;

/// Top of every hour.
pub const HOURLY_SWEEP_SCHEDULE: &str = "0 0 * * * *";

/// Periodically evicts completed reminders that outlived the grace window,
/// covering purge timers that never ran (e.g. across a suspend/resume).
pub struct CleanupService {
    reminders: ReminderScheduler,
    scheduler: JobScheduler,
}

impl CleanupService {
    pub async fn new(reminders: ReminderScheduler) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            reminders,
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let reminders = self.reminders.clone();

        let sweep_job = Job::new_async(HOURLY_SWEEP_SCHEDULE, move |_uuid, _l| {
            let reminders = reminders.clone();
            Box::pin(async move {
                let cleaned = reminders.sweep_completed();
                log_maintenance("hourly reminder sweep", cleaned);
            })
        })?;

        self.scheduler.add(sweep_job).await?;
        self.scheduler.start().await?;

        tracing::info!("Cleanup service started - sweeping completed reminders every hour");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Runs the sweep immediately instead of waiting for the next hour.
    pub fn sweep_now(&self) -> usize {
        let cleaned = self.reminders.sweep_completed();
        log_maintenance("manual reminder sweep", cleaned);
        cleaned
    }
}
