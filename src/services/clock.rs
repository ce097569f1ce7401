use chrono::{DateTime, Duration, Utc};
use tokio::time::Instant;

/// Source of the current time for the reminder scheduler.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock. Used in production so timers that slept through a suspend
/// still compare against the real time when they wake up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall-clock instant advanced by Tokio's monotonic clock.
///
/// With the runtime's time paused, `tokio::time::advance` moves this clock and
/// the reminder timers together.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: DateTime<Utc>,
    started: Instant,
}

impl MonotonicClock {
    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        Self {
            origin,
            started: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = Duration::from_std(self.started.elapsed()).unwrap_or_else(|_| Duration::zero());
        self.origin + elapsed
    }
}
