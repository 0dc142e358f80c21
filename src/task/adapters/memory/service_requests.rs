//! In-memory service request backend.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::task::{
    domain::{
        CaseId, PersistedTaskData, RecordedStatus, RemoteTaskId, Task, TaskFields, TaskId,
        TaskPatch, TaskStatus,
    },
    ports::{ServiceRequestApi, ServiceRequestApiError, ServiceRequestApiResult},
};
use chrono::{DateTime, Utc};

/// An update received by [`InMemoryServiceRequestApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpdate {
    /// Target service request.
    pub id: RemoteTaskId,
    /// Patch that was sent.
    pub patch: TaskPatch,
    /// Whether the backend accepted it.
    pub accepted: bool,
}

/// In-memory stand-in for the service request backend.
///
/// Assigns opaque UUID identifiers like the real backend, records every
/// update attempt and can be told to fail fetches or updates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceRequestApi {
    state: Arc<RwLock<InMemoryBackendState>>,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    requests: Vec<Task>,
    updates: Vec<RecordedUpdate>,
    fetches: usize,
    failing_fetches: Option<String>,
    failing_updates: Option<String>,
}

fn lock_error(err: impl ToString) -> ServiceRequestApiError {
    ServiceRequestApiError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryServiceRequestApi {
    /// Creates a backend with no service requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding `requests` in order.
    #[must_use]
    pub fn with_requests(requests: Vec<Task>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryBackendState {
                requests,
                ..InMemoryBackendState::default()
            })),
        }
    }

    /// Registers a customer-submitted service request and returns its
    /// backend-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the internal lock is poisoned.
    pub fn submit(
        &self,
        case_id: impl Into<String>,
        fields: TaskFields,
        status: TaskStatus,
        created_at: DateTime<Utc>,
    ) -> ServiceRequestApiResult<RemoteTaskId> {
        let id = RemoteTaskId::new(Uuid::new_v4().to_string())
            .map_err(|err| ServiceRequestApiError::MalformedResponse(err.to_string()))?;
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::Remote(id.clone()),
            case_id: CaseId::from_backend(case_id),
            fields,
            status: RecordedStatus::Known(status),
            created_at: Some(created_at),
        });
        let mut state = self.state.write().map_err(lock_error)?;
        state.requests.push(task);
        Ok(id)
    }

    /// Makes every following fetch fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the internal lock is poisoned.
    pub fn fail_fetches(&self, message: impl Into<String>) -> ServiceRequestApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_fetches = Some(message.into());
        Ok(())
    }

    /// Makes every following update fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the internal lock is poisoned.
    pub fn fail_updates(&self, message: impl Into<String>) -> ServiceRequestApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_updates = Some(message.into());
        Ok(())
    }

    /// Clears injected failures.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the internal lock is poisoned.
    pub fn recover(&self) -> ServiceRequestApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_fetches = None;
        state.failing_updates = None;
        Ok(())
    }

    /// Returns every update attempt in arrival order.
    ///
    /// Returns an empty list if the internal lock is poisoned.
    #[must_use]
    pub fn updates(&self) -> Vec<RecordedUpdate> {
        self.state
            .read()
            .map(|state| state.updates.clone())
            .unwrap_or_default()
    }

    /// Returns how many fetches were attempted.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.state.read().map(|state| state.fetches).unwrap_or(0)
    }
}

#[async_trait]
impl ServiceRequestApi for InMemoryServiceRequestApi {
    async fn fetch_all(&self) -> ServiceRequestApiResult<Vec<Task>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.fetches = state.fetches.saturating_add(1);
        if let Some(message) = state.failing_fetches.clone() {
            return Err(ServiceRequestApiError::transport(std::io::Error::other(
                message,
            )));
        }
        Ok(state.requests.clone())
    }

    async fn update(&self, id: &RemoteTaskId, patch: &TaskPatch) -> ServiceRequestApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let failure = state.failing_updates.clone();
        let position = state
            .requests
            .iter()
            .position(|task| matches!(task.id(), TaskId::Remote(remote) if remote == id));
        let accepted = failure.is_none() && position.is_some();
        state.updates.push(RecordedUpdate {
            id: id.clone(),
            patch: patch.clone(),
            accepted,
        });

        if let Some(message) = failure {
            return Err(ServiceRequestApiError::Rejected {
                status: 503,
                message,
            });
        }
        let request = position
            .and_then(|index| state.requests.get_mut(index))
            .ok_or_else(|| ServiceRequestApiError::NotFound(id.clone()))?;
        request.apply(patch.clone());
        Ok(())
    }
}
