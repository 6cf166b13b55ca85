//! Submission domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StatusError, json_type_name};

/// Review state of a submission
///
/// The set is closed: any other code reported by the API is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// All recognised status codes
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Status code as reported by the API
    pub fn code(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the chat
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| StatusError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single submission record from the `homeworks` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl Submission {
    /// Extracts a submission from a raw record
    ///
    /// Both fields are checked for presence before the status code is
    /// interpreted, so a record missing `status` reports the missing key
    /// rather than an unknown status.
    pub fn from_value(record: &Value) -> Result<Self> {
        let homework_name = required_field(record, "homework_name")?;
        let status = required_field(record, "status")?;

        Ok(Self {
            homework_name: homework_name.to_string(),
            status: status.parse()?,
        })
    }
}

fn required_field<'a>(record: &'a Value, field: &'static str) -> Result<&'a str> {
    match record.get(field) {
        None | Some(Value::Null) => Err(StatusError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(StatusError::InvalidField {
            field,
            found: json_type_name(other),
        }),
    }
}
