//! Board orchestration: fetch, merge and mutate.

use crate::board::domain::{Board, BoardLayout, partition};
use crate::task::{
    domain::{CaseId, Task, TaskId, TaskStatus},
    ports::{LocalTaskStore, LocalTaskStoreError, ServiceRequestApi, ServiceRequestApiError},
    services::{
        FormSession, FormSubmission, MutationOutcome, TaskForm, TaskFormError, TaskFormService,
        TransitionError, TransitionRequest, TransitionService,
    },
};
use mockable::Clock;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors returned by [`BoardService`].
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// The task is not visible on the board.
    #[error("task {0} is not on the board")]
    TaskNotOnBoard(TaskId),
    /// Fetching service requests failed.
    #[error(transparent)]
    Remote(#[from] ServiceRequestApiError),
    /// The local task store failed.
    #[error(transparent)]
    LocalStore(#[from] LocalTaskStoreError),
    /// A status transition failed.
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// A form submission failed.
    #[error(transparent)]
    Form(#[from] TaskFormError),
    /// The cached service request list is unusable.
    #[error("service request snapshot lock poisoned: {0}")]
    SnapshotPoisoned(String),
}

/// Result type for board operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Keeps the last fetched service requests and renders the merged board.
///
/// The remote snapshot is only replaced by a successful fetch; a failed one
/// leaves the previous list in place.
pub struct BoardService<A, S, C>
where
    A: ServiceRequestApi,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    store: Arc<S>,
    layout: BoardLayout,
    transitions: TransitionService<A, S>,
    forms: TaskFormService<A, S, C>,
    remote_snapshot: RwLock<Vec<Task>>,
}

impl<A, S, C> BoardService<A, S, C>
where
    A: ServiceRequestApi,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a board service with an empty remote snapshot.
    #[must_use]
    pub fn new(api: Arc<A>, store: Arc<S>, clock: Arc<C>, layout: BoardLayout) -> Self {
        Self {
            transitions: TransitionService::new(Arc::clone(&api), Arc::clone(&store)),
            forms: TaskFormService::new(Arc::clone(&api), Arc::clone(&store), clock),
            api,
            store,
            layout,
            remote_snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Returns the column layout.
    #[must_use]
    pub const fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Returns the form controller used by this board.
    #[must_use]
    pub const fn forms(&self) -> &TaskFormService<A, S, C> {
        &self.forms
    }

    /// Re-fetches service requests and returns the merged board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Remote`] when the fetch fails; the
    /// previous snapshot is kept.
    pub async fn refresh(&self) -> BoardServiceResult<Board> {
        let fetched = match self.api.fetch_all().await {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(error = %err, "failed to fetch service requests");
                return Err(err.into());
            }
        };
        info!(count = fetched.len(), "service requests fetched");
        {
            let mut snapshot = self
                .remote_snapshot
                .write()
                .map_err(|err| BoardServiceError::SnapshotPoisoned(err.to_string()))?;
            *snapshot = fetched;
        }
        self.board().await
    }

    /// Merges the current remote snapshot with the local store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the local store or the snapshot
    /// cannot be read.
    pub async fn board(&self) -> BoardServiceResult<Board> {
        let local = self.store.load().await?;
        let remote = self
            .remote_snapshot
            .read()
            .map_err(|err| BoardServiceError::SnapshotPoisoned(err.to_string()))?
            .clone();
        let board = partition(&remote, &local, &self.layout);
        debug!(
            visible = board.total(),
            hidden = board.hidden_count(),
            "board partitioned"
        );
        Ok(board)
    }

    /// Finds a visible task and its current column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotOnBoard`] when no column holds it.
    pub async fn locate(&self, id: &TaskId) -> BoardServiceResult<(Task, TaskStatus)> {
        let board = self.board().await?;
        board
            .locate(id)
            .map(|(task, status)| (task.clone(), status))
            .ok_or_else(|| BoardServiceError::TaskNotOnBoard(id.clone()))
    }

    /// Applies a transition and re-fetches when the backend took the write.
    ///
    /// A failed re-fetch after an accepted write is logged and the previous
    /// snapshot stays until the next refresh.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Transition`] when the transition fails.
    pub async fn move_task(
        &self,
        request: &TransitionRequest,
    ) -> BoardServiceResult<MutationOutcome> {
        let outcome = self.transitions.transition(request).await?;
        self.refetch_if(outcome.requires_refetch()).await;
        Ok(outcome)
    }

    /// Moves the task with `id` from whichever column holds it to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotOnBoard`] when the task is not
    /// visible, or the transition error.
    pub async fn move_task_to(
        &self,
        id: &TaskId,
        to: TaskStatus,
    ) -> BoardServiceResult<MutationOutcome> {
        let (_, from) = self.locate(id).await?;
        self.move_task(&TransitionRequest::new(id.clone(), from, to))
            .await
    }

    /// Creates a local task from `form`.
    ///
    /// The case code avoids every code in the local store and in the
    /// current service request snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Form`] when validation or the store
    /// write fails.
    pub async fn create_task(&self, form: &TaskForm) -> BoardServiceResult<Task> {
        let reserved = self.remote_case_ids()?;
        Ok(self.forms.create_reserving(form, &reserved).await?)
    }

    /// Edits the visible task with `id` using `form`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotOnBoard`] when the task is not
    /// visible, or the form error.
    pub async fn edit_task(
        &self,
        id: &TaskId,
        form: &TaskForm,
    ) -> BoardServiceResult<(Task, MutationOutcome)> {
        let (original, _) = self.locate(id).await?;
        let (task, outcome) = self.forms.edit(&original, form).await?;
        self.refetch_if(outcome.requires_refetch()).await;
        Ok((task, outcome))
    }

    /// Submits an open form session.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Form`] when the submission fails; the
    /// session then keeps its draft.
    pub async fn submit(&self, session: &mut FormSession) -> BoardServiceResult<FormSubmission> {
        let reserved = self.remote_case_ids()?;
        let submission = session.submit_reserving(&self.forms, &reserved).await?;
        self.refetch_if(submission.requires_refetch()).await;
        Ok(submission)
    }

    fn remote_case_ids(&self) -> BoardServiceResult<Vec<CaseId>> {
        let snapshot = self
            .remote_snapshot
            .read()
            .map_err(|err| BoardServiceError::SnapshotPoisoned(err.to_string()))?;
        Ok(snapshot.iter().map(|task| task.case_id().clone()).collect())
    }

    async fn refetch_if(&self, required: bool) {
        if !required {
            return;
        }
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "re-fetch after accepted update failed, board may be stale");
        }
    }
}
