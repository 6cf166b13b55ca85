//! Homework status response checks
//!
//! The status API returns `{"homeworks": [...], "current_date": <ts>}` with
//! the newest submission first. Validation only inspects the envelope;
//! individual records are checked when rendered.

use serde_json::Value;

use crate::error::{Result, StatusError, json_type_name};

/// Key holding the list of submission records
pub const HOMEWORKS_KEY: &str = "homeworks";

/// Key holding the server timestamp for the next poll
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Validates the response envelope and returns the submission records
///
/// # Errors
/// - [`StatusError::NotAnObject`] if the body is not a JSON object
/// - [`StatusError::MissingKey`] if `homeworks` or `current_date` is absent
/// - [`StatusError::HomeworksNotList`] if `homeworks` is not an array
pub fn validate_response(response: &Value) -> Result<&[Value]> {
    let body = response
        .as_object()
        .ok_or_else(|| StatusError::NotAnObject(json_type_name(response)))?;

    for key in [HOMEWORKS_KEY, CURRENT_DATE_KEY] {
        if !body.contains_key(key) {
            return Err(StatusError::MissingKey(key));
        }
    }

    match &body[HOMEWORKS_KEY] {
        Value::Array(homeworks) => Ok(homeworks.as_slice()),
        other => Err(StatusError::HomeworksNotList(json_type_name(other))),
    }
}

/// Reads `current_date` as a unix timestamp, if it is an integer
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE_KEY).and_then(Value::as_i64)
}
