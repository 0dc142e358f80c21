//! Status transitions requested from the board.

use super::routing::{MutationOutcome, route_patch};
use crate::task::{
    domain::{TaskId, TaskPatch, TaskStatus},
    ports::{LocalTaskStore, LocalTaskStoreError, ServiceRequestApi, ServiceRequestApiError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// A request to move one task between board columns.
///
/// Carries only identifiers so that any input modality (drag, keyboard,
/// command line) can issue it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
}

impl TransitionRequest {
    /// Creates a request moving `task_id` from column `from` to column `to`.
    #[must_use]
    pub const fn new(task_id: TaskId, from: TaskStatus, to: TaskStatus) -> Self {
        Self { task_id, from, to }
    }

    /// Returns the task to move.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the source column.
    #[must_use]
    pub const fn from_status(&self) -> TaskStatus {
        self.from
    }

    /// Returns the destination column.
    #[must_use]
    pub const fn to_status(&self) -> TaskStatus {
        self.to
    }
}

/// Errors returned by [`TransitionService`].
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The destination status has no board column.
    #[error("status {0} is not a board column")]
    NotABoardColumn(TaskStatus),
    /// The local task store failed.
    #[error(transparent)]
    LocalStore(#[from] LocalTaskStoreError),
    /// The backend rejected or never received the update.
    #[error(transparent)]
    Remote(#[from] ServiceRequestApiError),
}

/// Result type for transitions.
pub type TransitionResult<T> = Result<T, TransitionError>;

/// Applies status transitions through the store that owns each task.
#[derive(Clone)]
pub struct TransitionService<A, S>
where
    A: ServiceRequestApi,
    S: LocalTaskStore,
{
    api: Arc<A>,
    store: Arc<S>,
}

impl<A, S> TransitionService<A, S>
where
    A: ServiceRequestApi,
    S: LocalTaskStore,
{
    /// Creates a transition service.
    #[must_use]
    pub const fn new(api: Arc<A>, store: Arc<S>) -> Self {
        Self { api, store }
    }

    /// Moves a task to another column.
    ///
    /// A request whose destination equals its source is a card dropped back
    /// where it started: it returns [`MutationOutcome::Unchanged`] without
    /// touching either store. A remote outcome of
    /// [`MutationOutcome::SubmittedRemotely`] means the caller must re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotABoardColumn`] for destinations off the
    /// board, and store or backend errors otherwise. On error nothing local
    /// has changed.
    pub async fn transition(
        &self,
        request: &TransitionRequest,
    ) -> TransitionResult<MutationOutcome> {
        if !request.to.is_board_column() {
            return Err(TransitionError::NotABoardColumn(request.to));
        }
        if request.from == request.to {
            debug!(
                task_id = %request.task_id,
                status = %request.to,
                "transition to same column ignored"
            );
            return Ok(MutationOutcome::Unchanged);
        }
        debug!(
            task_id = %request.task_id,
            from = %request.from,
            to = %request.to,
            "transitioning task"
        );
        route_patch(
            &*self.api,
            &*self.store,
            &request.task_id,
            TaskPatch::Status(request.to),
        )
        .await
    }
}
