//! Port for the durable store of manually created tasks.

use crate::task::domain::{LocalTaskId, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for local task store operations.
pub type LocalTaskStoreResult<T> = Result<T, LocalTaskStoreError>;

/// Durable, installation-scoped list of locally created tasks.
///
/// Implementations only need [`load`](Self::load) and [`save`](Self::save);
/// the remaining operations are read-modify-write over those two. Callers
/// serialize mutations, so no locking is implied across the pair.
#[async_trait]
pub trait LocalTaskStore: Send + Sync {
    /// Returns the persisted tasks.
    ///
    /// Missing or unreadable data reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`LocalTaskStoreError::Persistence`] only when the adapter
    /// cannot reach its storage at all.
    async fn load(&self) -> LocalTaskStoreResult<Vec<Task>>;

    /// Replaces the persisted tasks with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalTaskStoreError`] when the write fails.
    async fn save(&self, tasks: &[Task]) -> LocalTaskStoreResult<()>;

    /// Appends a task to the persisted list.
    ///
    /// # Errors
    ///
    /// Returns [`LocalTaskStoreError::NotLocal`] for a task owned by the
    /// backend, or the underlying load/save error.
    async fn append(&self, task: &Task) -> LocalTaskStoreResult<()> {
        if !matches!(task.id(), TaskId::Local(_)) {
            return Err(LocalTaskStoreError::NotLocal(task.id().clone()));
        }
        let mut tasks = self.load().await?;
        tasks.push(task.clone());
        self.save(&tasks).await
    }

    /// Applies `patch` to the entry with `id`.
    ///
    /// Returns `false` without writing when no entry matches.
    ///
    /// # Errors
    ///
    /// Returns the underlying load/save error.
    async fn update(&self, id: &LocalTaskId, patch: TaskPatch) -> LocalTaskStoreResult<bool> {
        let mut tasks = self.load().await?;
        let Some(entry) = tasks
            .iter_mut()
            .find(|task| matches!(task.id(), TaskId::Local(local) if local == id))
        else {
            return Ok(false);
        };
        entry.apply(patch);
        self.save(&tasks).await?;
        Ok(true)
    }
}

/// Errors returned by local task store implementations.
#[derive(Debug, Clone, Error)]
pub enum LocalTaskStoreError {
    /// A backend-owned task was offered to the local store.
    #[error("task {0} is not owned by the local store")]
    NotLocal(TaskId),

    /// Persistence-layer failure.
    #[error("local task store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LocalTaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
