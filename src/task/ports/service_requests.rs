//! Port for the backend that owns customer service requests.

use crate::task::domain::{RemoteTaskId, Task, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for service request API operations.
pub type ServiceRequestApiResult<T> = Result<T, ServiceRequestApiError>;

/// Remote source of truth for service requests.
///
/// Writes are single requests with no retry. Callers re-fetch the full list
/// after a successful write instead of trusting any cached copy.
#[async_trait]
pub trait ServiceRequestApi: Send + Sync {
    /// Fetches every service request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestApiError`] when the backend cannot be reached
    /// or answers with something other than a list of records.
    async fn fetch_all(&self) -> ServiceRequestApiResult<Vec<Task>>;

    /// Sends a partial update for one service request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestApiError`] when the update was not accepted.
    async fn update(&self, id: &RemoteTaskId, patch: &TaskPatch) -> ServiceRequestApiResult<()>;
}

/// Errors returned by service request API adapters.
#[derive(Debug, Clone, Error)]
pub enum ServiceRequestApiError {
    /// The backend has no service request with this identifier.
    #[error("service request not found: {0}")]
    NotFound(RemoteTaskId),

    /// The backend answered with a non-success status.
    #[error("backend rejected the request with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    /// Network or runtime failure before a response arrived.
    #[error("backend transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceRequestApiError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
