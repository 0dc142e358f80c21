//! Merges remote and local tasks into board columns.

use super::{BoardLayout, ColumnSpec};
use crate::task::domain::{Task, TaskId, TaskStatus};
use std::collections::HashMap;

/// One column of the board with its tasks in merge order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    spec: ColumnSpec,
    tasks: Vec<Task>,
}

impl BoardColumn {
    /// Returns the column metadata.
    #[must_use]
    pub const fn spec(&self) -> &ColumnSpec {
        &self.spec
    }

    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.spec.status()
    }

    /// Returns the tasks in this column.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in this column.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// The merged, status-partitioned board.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: Vec<BoardColumn>,
    hidden_count: usize,
}

impl Board {
    /// Returns the columns in layout order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the column for `status`, if it is on the board.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status() == status)
    }

    /// Returns the number of tasks visible on the board.
    #[must_use]
    pub fn total(&self) -> usize {
        self.columns.iter().map(BoardColumn::count).sum()
    }

    /// Returns how many tasks were left off the board because their status
    /// has no column (archived or unrecognized).
    #[must_use]
    pub const fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    /// Finds a visible task and the column holding it.
    #[must_use]
    pub fn locate(&self, id: &TaskId) -> Option<(&Task, TaskStatus)> {
        self.columns.iter().find_map(|column| {
            column
                .tasks
                .iter()
                .find(|task| task.id() == id)
                .map(|task| (task, column.status()))
        })
    }
}

/// Builds the board from the backend list and the local store contents.
///
/// Remote tasks come first, then local ones; within a column tasks keep that
/// order. Tasks whose status has no column are counted as hidden. The result
/// depends only on the inputs.
#[must_use]
pub fn partition(remote: &[Task], local: &[Task], layout: &BoardLayout) -> Board {
    let mut buckets: HashMap<TaskStatus, Vec<Task>> = HashMap::new();
    let mut hidden_count = 0_usize;

    for task in remote.iter().chain(local) {
        match task.status().known().filter(|status| layout.contains(*status)) {
            Some(status) => buckets.entry(status).or_default().push(task.clone()),
            None => hidden_count = hidden_count.saturating_add(1),
        }
    }

    let columns = layout
        .columns()
        .iter()
        .map(|spec| BoardColumn {
            spec: spec.clone(),
            tasks: buckets.remove(&spec.status()).unwrap_or_default(),
        })
        .collect();

    Board {
        columns,
        hidden_count,
    }
}
