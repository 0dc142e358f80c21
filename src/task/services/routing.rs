//! Sends a task patch to whichever store owns the task.

use crate::task::{
    domain::{TaskId, TaskPatch},
    ports::{LocalTaskStore, LocalTaskStoreError, ServiceRequestApi, ServiceRequestApiError},
};
use tracing::{debug, error, info, warn};

/// What a routed mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Nothing to do; no store was touched.
    Unchanged,
    /// The local task store entry was updated.
    AppliedLocally,
    /// The local task no longer exists; nothing was written.
    LocalTaskMissing,
    /// The backend accepted the update.
    SubmittedRemotely,
}

impl MutationOutcome {
    /// Returns whether the caller must re-fetch service requests to see the
    /// authoritative result.
    #[must_use]
    pub const fn requires_refetch(self) -> bool {
        matches!(self, Self::SubmittedRemotely)
    }
}

/// Applies `patch` through the owner of `id`.
///
/// Local tasks are patched in the store; remote tasks get exactly one backend
/// update. A failed backend update leaves every local structure as it was.
pub(super) async fn route_patch<A, S, E>(
    api: &A,
    store: &S,
    id: &TaskId,
    patch: TaskPatch,
) -> Result<MutationOutcome, E>
where
    A: ServiceRequestApi + ?Sized,
    S: LocalTaskStore + ?Sized,
    E: From<LocalTaskStoreError> + From<ServiceRequestApiError>,
{
    match id {
        TaskId::Local(local_id) => {
            debug!(task_id = %local_id, "routing patch to local task store");
            if store.update(local_id, patch).await? {
                info!(task_id = %local_id, "local task updated");
                Ok(MutationOutcome::AppliedLocally)
            } else {
                warn!(task_id = %local_id, "local task no longer exists, nothing updated");
                Ok(MutationOutcome::LocalTaskMissing)
            }
        }
        TaskId::Remote(remote_id) => {
            debug!(task_id = %remote_id, "routing patch to service request backend");
            api.update(remote_id, &patch).await.map_err(|err| {
                error!(task_id = %remote_id, error = %err, "service request update failed");
                E::from(err)
            })?;
            info!(task_id = %remote_id, "service request update accepted");
            Ok(MutationOutcome::SubmittedRemotely)
        }
    }
}
