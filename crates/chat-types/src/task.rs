//! Backend-owned task records, rendered read-only in the task log.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub parameters: TaskParameters,
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Task status; anything the client does not know is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Completed,
    InProgress,
    Failed,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Completed => "completed",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Failed => "failed",
            TaskStatus::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Failed => "Failed",
            TaskStatus::Other(s) => s,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "completed" => TaskStatus::Completed,
            "in_progress" => TaskStatus::InProgress,
            "failed" => TaskStatus::Failed,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Task {
    pub fn query(&self) -> Option<&str> {
        self.parameters.query.as_deref()
    }
}

/// Format a backend timestamp for display.
///
/// Accepts RFC 3339 and naive ISO 8601 (with or without fractional seconds).
/// Anything else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}
