//! HTTP adapter for the service request backend.
//!
//! Talks to `GET {base}/api/service-requests/` and
//! `PUT {base}/api/service-requests/{id}`. Requests are blocking `ureq`
//! calls moved onto the blocking thread pool.

use super::records::{TaskRecord, patch_body};
use crate::task::{
    domain::{RemoteTaskId, Task, TaskPatch},
    ports::{ServiceRequestApi, ServiceRequestApiError, ServiceRequestApiResult},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

const SERVICE_REQUESTS_PATH: &str = "/api/service-requests/";

/// `ureq`-backed service request API client.
#[derive(Debug, Clone)]
pub struct HttpServiceRequestApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpServiceRequestApi {
    /// Creates a client for `base_url` with a per-request timeout.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the collection URL.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}{SERVICE_REQUESTS_PATH}", self.base_url)
    }

    /// Returns the URL of one service request; the identifier is
    /// percent-encoded as a single path segment.
    #[must_use]
    pub fn item_url(&self, id: &RemoteTaskId) -> String {
        format!(
            "{}{SERVICE_REQUESTS_PATH}{}",
            self.base_url,
            encode_path_segment(id.as_str())
        )
    }

    async fn run_blocking<F, T>(&self, f: F) -> ServiceRequestApiResult<T>
    where
        F: FnOnce(&ureq::Agent) -> ServiceRequestApiResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || f(&agent))
            .await
            .map_err(ServiceRequestApiError::transport)?
    }
}

/// Encodes everything outside the RFC 3986 unreserved set.
fn encode_path_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|byte| {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
                char::from(byte).to_string()
            } else {
                format!("%{byte:02X}")
            }
        })
        .collect()
}

fn map_call_error(err: ureq::Error, id: Option<&RemoteTaskId>) -> ServiceRequestApiError {
    match (err, id) {
        (ureq::Error::Status(404, _), Some(missing)) => {
            ServiceRequestApiError::NotFound(missing.clone())
        }
        (ureq::Error::Status(status, response), _) => ServiceRequestApiError::Rejected {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        (ureq::Error::Transport(transport), _) => {
            ServiceRequestApiError::transport(std::io::Error::other(transport.to_string()))
        }
    }
}

#[async_trait]
impl ServiceRequestApi for HttpServiceRequestApi {
    async fn fetch_all(&self) -> ServiceRequestApiResult<Vec<Task>> {
        let url = self.collection_url();
        let records: Vec<TaskRecord> = self
            .run_blocking(move |agent| {
                agent
                    .get(&url)
                    .call()
                    .map_err(|err| map_call_error(err, None))?
                    .into_json()
                    .map_err(|err| ServiceRequestApiError::MalformedResponse(err.to_string()))
            })
            .await?;

        let fetched = records.len();
        let tasks: Vec<Task> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                record
                    .into_remote_task()
                    .inspect_err(|err| warn!(id = %id, error = %err, "skipping service request"))
                    .ok()
            })
            .collect();
        debug!(fetched, accepted = tasks.len(), "fetched service requests");
        Ok(tasks)
    }

    async fn update(&self, id: &RemoteTaskId, patch: &TaskPatch) -> ServiceRequestApiResult<()> {
        let url = self.item_url(id);
        let body = patch_body(patch);
        let target = id.clone();
        self.run_blocking(move |agent| {
            agent
                .put(&url)
                .send_json(body)
                .map(drop)
                .map_err(|err| map_call_error(err, Some(&target)))
        })
        .await
    }
}
