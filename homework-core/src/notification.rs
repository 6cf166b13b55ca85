//! Notification text

use serde_json::Value;

use crate::domain::homework::Submission;
use crate::error::Result;

/// Prefix of every error notification
pub const ERROR_PREFIX: &str = "Сбой в работе программы";

/// Renders the status-change message for a raw submission record
///
/// # Errors
/// Fails if `homework_name` or `status` is missing, or if the status code
/// is not recognised.
pub fn render_notification(record: &Value) -> Result<String> {
    let submission = Submission::from_value(record)?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        submission.homework_name,
        submission.status.verdict()
    ))
}

/// Builds the message reported to the chat when a poll cycle fails
pub fn error_notification(error: &impl std::fmt::Display) -> String {
    format!("{}: {}", ERROR_PREFIX, error)
}
