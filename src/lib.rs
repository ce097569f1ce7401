//! # Reminder Bot
//!
//! A Telegram bot that delivers one-shot personal reminders.
//!
//! ## Features
//! - Natural-language times: `30m`, `5pm`, `9:30 am`, `tomorrow`, `next week`
//! - Per-user listing and cancellation, with inline cancel buttons
//! - In-memory scheduler with one timer per reminder and a pluggable
//!   notification callback
//! - Hourly cleanup of delivered reminders and an HTTP health endpoint

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Reminder model and statistics
pub mod models;
/// Reminder scheduler, notification transport and background services
pub mod services;
/// Utility functions for datetime, validation, and formatting
pub mod utils;
