//! Error types for board configuration.

use crate::task::domain::TaskStatus;
use thiserror::Error;

/// Errors returned while validating a board layout.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardLayoutError {
    /// The status is tracked off the board.
    #[error("status {0} cannot be a board column")]
    NotABoardStatus(TaskStatus),

    /// The status appears in more than one column.
    #[error("status {0} is configured for more than one column")]
    DuplicateColumn(TaskStatus),

    /// A lifecycle status has no column.
    #[error("board has no column for status {0}")]
    MissingColumn(TaskStatus),

    /// A column label is blank.
    #[error("column for status {0} has an empty label")]
    EmptyLabel(TaskStatus),
}
