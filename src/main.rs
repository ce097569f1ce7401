//! # Reminder Bot Main Entry Point
//!
//! Initializes logging, loads configuration, wires the scheduler to the
//! Telegram transport and runs the bot next to the health server.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reminder_bot::bot::handlers::BotHandler;
use reminder_bot::config::Config;
use reminder_bot::services::cleanup::CleanupService;
use reminder_bot::services::health::HealthService;
use reminder_bot::services::notifier::TelegramNotifier;
use reminder_bot::services::reminder::ReminderScheduler;
use reminder_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reminder_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Reminder Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - HTTP Port: {}, timezone: {}",
        config.http_port, config.timezone
    );

    let bot = Bot::new(&config.telegram_bot_token);

    // Wire the scheduler to Telegram delivery
    let reminders = ReminderScheduler::new(config.timezone);
    let notifier = TelegramNotifier::new(bot.clone(), config.timezone);
    reminders.set_notification_callback(move |reminder| {
        let notifier = notifier.clone();
        async move { notifier.deliver(reminder).await }
    });
    log_system_event("scheduler ready", None);

    info!("Initializing cleanup service...");
    let mut cleanup_service = match CleanupService::new(reminders.clone()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to create cleanup service: {}", e);
            return Err(anyhow::anyhow!("Failed to create cleanup service: {}", e));
        }
    };

    if let Err(e) = cleanup_service.start().await {
        tracing::error!("Failed to start cleanup service: {}", e);
    } else {
        info!("Cleanup service started successfully");
    }

    let handler = BotHandler::new(reminders.clone());

    let health_service = HealthService::new(reminders.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    if let Err(e) = cleanup_service.stop().await {
        tracing::warn!("Error stopping cleanup service: {}", e);
    }

    let aborted = reminders.shutdown();
    log_system_event(
        "shutdown",
        Some(&format!("{} pending reminders dropped", aborted)),
    );
    Ok(())
}
