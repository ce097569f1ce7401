use anyhow::{anyhow, Result};
use chrono::{FixedOffset, Offset, Utc};
use std::env;

use crate::utils::datetime::LocalZone;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub http_port: u16,
    /// Zone used to read clock times like `5pm` and to display reminder times.
    /// Follows the host zone, DST included, unless `REMINDER_UTC_OFFSET` pins it.
    pub timezone: LocalZone,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        // Hosting platforms commonly inject PORT instead.
        let port_str = env::var("HTTP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let timezone = match env::var("REMINDER_UTC_OFFSET") {
            Ok(raw) if !raw.trim().is_empty() => LocalZone::Fixed(parse_utc_offset(&raw)?),
            _ => LocalZone::System,
        };

        Ok(Config {
            telegram_bot_token: token,
            http_port,
            timezone,
        })
    }
}

/// Parses offsets such as `+02:00`, `-0530` or `UTC`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("utc") || raw.eq_ignore_ascii_case("z") {
        return Ok(Utc.fix());
    }

    raw.parse::<FixedOffset>()
        .map_err(|_| anyhow!("Invalid REMINDER_UTC_OFFSET '{}', expected e.g. +02:00", raw))
}
