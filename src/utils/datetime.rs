//! Natural-language reminder times and their display formatting.
//!
//! [`parse_time`] understands, in this order:
//! - relative durations: `30m`, `2 hours`, `3d`, `1w`
//! - clock times: `5pm`, `9:30 am`, `14:30`
//! - phrases: `tomorrow`, `next week`, `tonight`
//! - absolute dates: RFC 3339, RFC 2822, `2026-10-20 08:15`, `2026-10-20`
//!
//! Clock times and phrases are resolved in the zone carried by `now`, so a
//! zone with daylight saving keeps `tomorrow` at 09:00 local across a switch.

use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const MILLIS_PER_MINUTE: i64 = 60 * 1000;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Hour used for `tomorrow`.
const MORNING_HOUR: u32 = 9;
/// Hour used for `tonight`.
const EVENING_HOUR: u32 = 20;

static RELATIVE_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static CLOCK_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

fn relative_pattern() -> Option<&'static Regex> {
    RELATIVE_PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^([0-9]+)\s*(m|min|mins|minute|minutes|h|hr|hrs|hour|hours|d|day|days|w|week|weeks)$",
            )
            .ok()
        })
        .as_ref()
}

fn clock_pattern() -> Option<&'static Regex> {
    CLOCK_PATTERN
        .get_or_init(|| Regex::new(r"^([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)?$").ok())
        .as_ref()
}

/// Zone used for clock times, named phrases and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalZone {
    /// The host's zone, including its daylight saving rules.
    System,
    Fixed(FixedOffset),
}

impl LocalZone {
    /// [`parse_time`] evaluated in this zone.
    pub fn parse_time(&self, input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            LocalZone::System => {
                parse_time(input, now.with_timezone(&Local)).map(|t| t.with_timezone(&Utc))
            }
            LocalZone::Fixed(offset) => {
                parse_time(input, now.with_timezone(offset)).map(|t| t.with_timezone(&Utc))
            }
        }
    }

    /// [`format_reminder_time`] in this zone.
    pub fn format(&self, at: &DateTime<Utc>) -> String {
        match self {
            LocalZone::System => format_reminder_time(at, &Local),
            LocalZone::Fixed(offset) => format_reminder_time(at, offset),
        }
    }
}

impl From<FixedOffset> for LocalZone {
    fn from(offset: FixedOffset) -> Self {
        LocalZone::Fixed(offset)
    }
}

impl fmt::Display for LocalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalZone::System => f.write_str("system local time"),
            LocalZone::Fixed(offset) => write!(f, "UTC{offset}"),
        }
    }
}

/// Resolves a user-supplied time expression to an absolute instant.
///
/// Returns `None` when nothing matches. Relative durations, clock times and
/// `tomorrow`/`next week` always land in the future; `tonight` and absolute
/// dates are returned as-is (absolute dates only when after `now`).
pub fn parse_time<Tz: TimeZone>(input: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let normalized = input.trim().to_lowercase();

    if let Some(caps) = relative_pattern().and_then(|re| re.captures(&normalized)) {
        return parse_relative(&caps[1], &caps[2], now);
    }

    if let Some(caps) = clock_pattern().and_then(|re| re.captures(&normalized)) {
        let minute = caps.get(2).map(|m| m.as_str());
        let period = caps.get(3).map(|m| m.as_str());
        return parse_clock_time(&caps[1], minute, period, now);
    }

    match normalized.as_str() {
        "tomorrow" => {
            let date = now.date_naive().succ_opt()?;
            at_local_time(&now.timezone(), date, NaiveTime::from_hms_opt(MORNING_HOUR, 0, 0)?)
        }
        "next week" => now.checked_add_signed(Duration::try_days(7)?),
        // Not rolled forward when already past 20:00.
        "tonight" => at_local_time(
            &now.timezone(),
            now.date_naive(),
            NaiveTime::from_hms_opt(EVENING_HOUR, 0, 0)?,
        ),
        _ => parse_absolute(input.trim(), &now.timezone()).filter(|parsed| *parsed > now),
    }
}

fn parse_relative<Tz: TimeZone>(amount: &str, unit: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let amount: i64 = amount.parse().ok()?;
    let delta = match unit {
        "m" | "min" | "mins" | "minute" | "minutes" => Duration::try_minutes(amount)?,
        "h" | "hr" | "hrs" | "hour" | "hours" => Duration::try_hours(amount)?,
        "d" | "day" | "days" => Duration::try_days(amount)?,
        "w" | "week" | "weeks" => Duration::try_weeks(amount)?,
        _ => return None,
    };
    now.checked_add_signed(delta)
}

/// Whether `word` is a unit accepted after a relative amount, as `min` in `5 min`.
pub fn is_duration_unit(word: &str) -> bool {
    matches!(
        word,
        "m" | "min"
            | "mins"
            | "minute"
            | "minutes"
            | "h"
            | "hr"
            | "hrs"
            | "hour"
            | "hours"
            | "d"
            | "day"
            | "days"
            | "w"
            | "week"
            | "weeks"
    )
}

fn parse_clock_time<Tz: TimeZone>(
    hour: &str,
    minute: Option<&str>,
    period: Option<&str>,
    now: DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = match minute {
        Some(m) => m.parse().ok()?,
        None => 0,
    };

    let hour = match period {
        Some("pm") if (1..=12).contains(&hour) => {
            if hour == 12 {
                12
            } else {
                hour + 12
            }
        }
        Some("am") if (1..=12).contains(&hour) => {
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        Some(_) => return None,
        None if hour <= 23 => hour,
        None => return None,
    };

    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let candidate = at_local_time(&now.timezone(), now.date_naive(), time)?;
    if candidate <= now {
        candidate.checked_add_signed(Duration::try_days(1)?)
    } else {
        Some(candidate)
    }
}

fn parse_absolute<Tz: TimeZone>(raw: &str, zone: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(zone));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(zone));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return zone.from_local_datetime(&naive).earliest();
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| at_local_time(zone, date, NaiveTime::from_hms_opt(0, 0, 0)?))
}

/// `date` at `time` in `zone`. A wall time repeated by a DST fall-back
/// resolves to its first occurrence; one skipped by spring-forward is `None`.
fn at_local_time<Tz: TimeZone>(zone: &Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    zone.from_local_datetime(&date.and_time(time)).earliest()
}

/// Human readable time remaining until `due_at`, e.g. `"1 day, 2 hours, 5 minutes"`.
pub fn format_time_until(due_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = due_at.signed_duration_since(now).num_milliseconds();
    if remaining <= 0 {
        return "now".to_string();
    }

    let days = remaining / MILLIS_PER_DAY;
    let hours = (remaining % MILLIS_PER_DAY) / MILLIS_PER_HOUR;
    let minutes = (remaining % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| pluralize(value, unit))
        .collect();

    if parts.is_empty() {
        "less than a minute".to_string()
    } else {
        parts.join(", ")
    }
}

fn pluralize(value: i64, unit: &str) -> String {
    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

/// Display form of a reminder time in the bot's local zone.
pub fn format_reminder_time<Tz>(at: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.with_timezone(zone)
        .format("%a, %b %-d, %Y, %I:%M %p")
        .to_string()
}
