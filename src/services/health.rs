use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use crate::models::ReminderStats;
use crate::services::reminder::ReminderScheduler;
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub reminders: ReminderStats,
}

#[derive(Clone)]
pub struct AppState {
    pub reminders: ReminderScheduler,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(reminders: ReminderScheduler) -> Self {
        let state = AppState {
            reminders,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/", get(root))
            .route("/status", get(status))
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Self { router }
    }
}

/// Every pending reminder must own exactly one armed timer.
fn timers_consistent(stats: &ReminderStats) -> bool {
    stats.scheduled_timers == stats.active_reminders
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let stats = state.reminders.stats();
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    if !timers_consistent(&stats) {
        tracing::warn!(
            "Health check: {} active reminders but {} armed timers",
            stats.active_reminders,
            stats.scheduled_timers
        );
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        reminders: stats,
    }))
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    if timers_consistent(&state.reminders.stats()) {
        Ok(Json("ready"))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn liveness_check() -> Json<&'static str> {
    // If this endpoint responds, the process is alive
    Json("alive")
}

async fn status() -> &'static str {
    "Reminder Bot is running! ✅"
}

async fn root() -> &'static str {
    "Reminder Bot - Online and Ready! 🤖"
}
