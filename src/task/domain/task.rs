//! Task aggregate root and the patches applied to it.

use super::{CaseId, LocalTaskId, Provenance, RecordedStatus, TaskFields, TaskId, TaskStatus};
use chrono::{DateTime, Utc};

/// A service case tracked on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    case_id: CaseId,
    fields: TaskFields,
    status: RecordedStatus,
    created_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted or fetched task.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Task identifier carrying its provenance.
    pub id: TaskId,
    /// Case code.
    pub case_id: CaseId,
    /// Editable fields.
    pub fields: TaskFields,
    /// Recorded status.
    pub status: RecordedStatus,
    /// Creation timestamp, when the source recorded one.
    pub created_at: Option<DateTime<Utc>>,
}

/// A change applied to a single task by its owning store.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPatch {
    /// Move the task to another status.
    Status(TaskStatus),
    /// Replace the form-editable fields.
    Fields(TaskFields),
}

impl Task {
    /// Creates a pending task owned by the local store.
    #[must_use]
    pub const fn new_local(
        id: LocalTaskId,
        case_id: CaseId,
        fields: TaskFields,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::Local(id),
            case_id,
            fields,
            status: RecordedStatus::Known(TaskStatus::Pending),
            created_at: Some(created_at),
        }
    }

    /// Reconstructs a task from persisted or fetched data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            case_id: data.case_id,
            fields: data.fields,
            status: data.status,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning store.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.id.provenance()
    }

    /// Returns the case code.
    #[must_use]
    pub const fn case_id(&self) -> &CaseId {
        &self.case_id
    }

    /// Returns the editable fields.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
    }

    /// Returns the recorded status.
    #[must_use]
    pub const fn status(&self) -> &RecordedStatus {
        &self.status
    }

    /// Returns the creation timestamp, if recorded.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Applies a patch. Identity, case code and creation time never change.
    pub fn apply(&mut self, patch: TaskPatch) {
        match patch {
            TaskPatch::Status(status) => self.status = RecordedStatus::Known(status),
            TaskPatch::Fields(fields) => self.fields = fields,
        }
    }

    /// Returns a copy with `patch` applied.
    #[must_use]
    pub fn patched(&self, patch: TaskPatch) -> Self {
        let mut updated = self.clone();
        updated.apply(patch);
        updated
    }
}
