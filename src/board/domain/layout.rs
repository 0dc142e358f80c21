//! Column configuration of the board.

use super::BoardLayoutError;
use crate::task::domain::TaskStatus;

/// Display metadata for one board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    status: TaskStatus,
    label: String,
    color: String,
}

impl ColumnSpec {
    /// Creates a column for `status`.
    #[must_use]
    pub fn new(status: TaskStatus, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
            color: color.into(),
        }
    }

    /// Returns the built-in column for `status`.
    #[must_use]
    pub fn default_for(status: TaskStatus) -> Self {
        let (label, color) = match status {
            TaskStatus::Pending => ("Pending", "orange"),
            TaskStatus::InProgress => ("In progress", "blue"),
            TaskStatus::Completed => ("Completed", "green"),
            TaskStatus::PickedUp => ("Picked up", "purple"),
            TaskStatus::Archived => ("Archived", "gray"),
        };
        Self::new(status, label, color)
    }

    /// Returns the status collected by this column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column heading.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the column color name.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Ordered board columns: every lifecycle status shown on the board, once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    columns: Vec<ColumnSpec>,
}

impl BoardLayout {
    /// Creates a validated layout.
    ///
    /// Order and display metadata are free; the set of statuses is not.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLayoutError`] when a column uses `archived`, a status
    /// repeats, a board status is missing or a label is blank.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, BoardLayoutError> {
        let mut seen = Vec::with_capacity(columns.len());
        for column in &columns {
            if !column.status.is_board_column() {
                return Err(BoardLayoutError::NotABoardStatus(column.status));
            }
            if seen.contains(&column.status) {
                return Err(BoardLayoutError::DuplicateColumn(column.status));
            }
            if column.label.trim().is_empty() {
                return Err(BoardLayoutError::EmptyLabel(column.status));
            }
            seen.push(column.status);
        }
        if let Some(missing) = TaskStatus::BOARD_COLUMNS
            .into_iter()
            .find(|status| !seen.contains(status))
        {
            return Err(BoardLayoutError::MissingColumn(missing));
        }
        Ok(Self { columns })
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Returns the column statuses in display order.
    pub fn statuses(&self) -> impl Iterator<Item = TaskStatus> + '_ {
        self.columns.iter().map(ColumnSpec::status)
    }

    /// Returns whether `status` has a column.
    #[must_use]
    pub fn contains(&self, status: TaskStatus) -> bool {
        self.statuses().any(|candidate| candidate == status)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            columns: TaskStatus::BOARD_COLUMNS
                .into_iter()
                .map(ColumnSpec::default_for)
                .collect(),
        }
    }
}
