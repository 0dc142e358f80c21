//! In-memory local task store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::Task,
    ports::{LocalTaskStore, LocalTaskStoreError, LocalTaskStoreResult},
};

/// Thread-safe in-memory local task store.
///
/// Counts every [`save`](LocalTaskStore::save) so tests can assert that an
/// operation left the store untouched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: Vec<Task>,
    saves: usize,
}

impl InMemoryLocalTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks` without counting a save.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState { tasks, saves: 0 })),
        }
    }

    /// Returns how many times the task list has been written.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state.read().map(|state| state.saves).unwrap_or(0)
    }
}

#[async_trait]
impl LocalTaskStore for InMemoryLocalTaskStore {
    async fn load(&self) -> LocalTaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            LocalTaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.clone())
    }

    async fn save(&self, tasks: &[Task]) -> LocalTaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            LocalTaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.tasks = tasks.to_vec();
        state.saves = state.saves.saturating_add(1);
        Ok(())
    }
}
