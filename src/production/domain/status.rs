//! Task status values and their wire encoding.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall status of a production task.
///
/// The status is largely derived from stage movement: it becomes
/// [`TaskStatus::Completed`] exactly when the task reaches its terminal
/// stage, and may be restored to [`TaskStatus::InProgress`] when the last
/// outstanding rejection on a task is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The task has been created but work has not started.
    Pending,
    /// The task is being worked.
    InProgress,
    /// All stages are complete.
    Completed,
    /// The task was abandoned before completion.
    Cancelled,
}

impl TaskStatus {
    /// Returns the single-character wire encoding of the status.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "P",
            Self::InProgress => "I",
            Self::Completed => "C",
            Self::Cancelled => "X",
        }
    }

    /// Returns the human-readable status name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "P" => Ok(Self::Pending),
            "I" => Ok(Self::InProgress),
            "C" => Ok(Self::Completed),
            "X" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
