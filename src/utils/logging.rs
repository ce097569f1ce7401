use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_START: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, user_id: u64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: &str, user_id: u64, chat_id: i64, error: &str) {
    error!(
        "CMD_ERROR: {} by {}({}) in chat {} - {}",
        command, user, user_id, chat_id, error
    );
}

/// Logs validation errors with consistent format
pub fn log_validation_error(command: &str, field: &str, value: &str, error: &str, user_id: u64, chat_id: i64) {
    warn!(
        "VALIDATION_ERROR: {} - field '{}' invalid ({}): {} - user {} in chat {}",
        command, field, value, error, user_id, chat_id
    );
}

/// Logs reminder lifecycle transitions (created, cancelled, triggered)
pub fn log_reminder_event(event: &str, reminder_id: u64, owner_id: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("REMINDER: #{} {} for user {} - {}", reminder_id, event, owner_id, d),
        None => info!("REMINDER: #{} {} for user {}", reminder_id, event, owner_id),
    }
}

/// Logs periodic maintenance such as the cleanup sweep
pub fn log_maintenance(task: &str, affected: usize) {
    if affected > 0 {
        info!("MAINTENANCE: {} affected {} reminders", task, affected);
    } else {
        debug!("MAINTENANCE: {} found nothing to do", task);
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
