//! Task lifecycle status.

use super::ParseTaskStatusError;
use std::fmt;

/// Known lifecycle statuses of a service case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskStatus {
    /// Received, work has not started.
    Pending,
    /// Recovery work is underway.
    InProgress,
    /// Work finished, waiting for the customer.
    Completed,
    /// The customer collected the device.
    PickedUp,
    /// Closed out of the active board.
    Archived,
}

impl TaskStatus {
    /// All known statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::PickedUp,
        Self::Archived,
    ];

    /// Statuses shown as board columns, in lifecycle order.
    pub const BOARD_COLUMNS: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::PickedUp,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::PickedUp => "picked_up",
            Self::Archived => "archived",
        }
    }

    /// Returns whether the status has a column on the board.
    #[must_use]
    pub const fn is_board_column(self) -> bool {
        !matches!(self, Self::Archived)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "picked_up" => Ok(Self::PickedUp),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Status as recorded on a task.
///
/// Records written by other clients may carry values this crate does not
/// know. They are kept verbatim so that rewriting a record never loses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordedStatus {
    /// One of the known lifecycle statuses.
    Known(TaskStatus),
    /// A value outside the known lifecycle.
    Unrecognized(String),
}

impl RecordedStatus {
    /// Reads a raw status; missing or blank values mean `pending`.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Known(TaskStatus::Pending),
            Some(value) => TaskStatus::try_from(value)
                .map_or_else(|_| Self::Unrecognized(value.to_owned()), Self::Known),
        }
    }

    /// Returns the known status, if any.
    #[must_use]
    pub const fn known(&self) -> Option<TaskStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Unrecognized(_) => None,
        }
    }

    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Unrecognized(value) => value,
        }
    }
}

impl Default for RecordedStatus {
    fn default() -> Self {
        Self::Known(TaskStatus::Pending)
    }
}

impl From<TaskStatus> for RecordedStatus {
    fn from(status: TaskStatus) -> Self {
        Self::Known(status)
    }
}

impl fmt::Display for RecordedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
