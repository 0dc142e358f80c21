//! Shared fixtures for in-memory board integration tests.

use std::sync::Arc;

use caseboard::board::{domain::BoardLayout, services::BoardService};
use caseboard::task::{
    adapters::memory::{InMemoryLocalTaskStore, InMemoryServiceRequestApi},
    domain::{
        CaseId, DeviceType, LocalTaskId, PersistedTaskData, RecordedStatus, RemoteTaskId, Task,
        TaskFields, TaskId, TaskStatus, Urgency,
    },
};
use chrono::{Duration, Utc};
use mockable::DefaultClock;

/// Board service type wired to in-memory adapters.
pub type TestBoard = BoardService<InMemoryServiceRequestApi, InMemoryLocalTaskStore, DefaultClock>;

/// Handles onto both stores and the board built over them.
pub struct BoardHarness {
    pub api: Arc<InMemoryServiceRequestApi>,
    pub store: Arc<InMemoryLocalTaskStore>,
    pub board: TestBoard,
}

impl BoardHarness {
    /// Builds a board over the given remote and local tasks.
    #[must_use]
    pub fn new(remote: Vec<Task>, local: Vec<Task>) -> Self {
        let api = Arc::new(InMemoryServiceRequestApi::with_requests(remote));
        let store = Arc::new(InMemoryLocalTaskStore::with_tasks(local));
        let board = BoardService::new(
            Arc::clone(&api),
            Arc::clone(&store),
            Arc::new(DefaultClock),
            BoardLayout::default(),
        );
        Self { api, store, board }
    }
}

fn fields(name: &str) -> TaskFields {
    TaskFields::new(name)
        .with_device_type(DeviceType::Hdd)
        .with_urgency(Urgency::High)
}

/// A backend service request with `status`.
#[must_use]
pub fn service_request(id: &str, status: &str) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::Remote(RemoteTaskId::new(id).expect("valid remote id")),
        case_id: CaseId::from_backend(format!("SR-{id}")),
        fields: fields("Backend customer"),
        status: RecordedStatus::from_raw(Some(status)),
        created_at: Some(Utc::now() - Duration::hours(3)),
    })
}

/// A locally created task with `status`.
#[must_use]
pub fn manual_task(id: &str, status: TaskStatus) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::Local(LocalTaskId::parse(id).expect("valid local id")),
        case_id: CaseId::from_backend("DL2024001"),
        fields: fields("Walk-in customer"),
        status: RecordedStatus::Known(status),
        created_at: Some(Utc::now() - Duration::days(2)),
    })
}

/// Parses a task identifier.
#[must_use]
pub fn id(raw: &str) -> TaskId {
    TaskId::parse(raw).expect("valid task id")
}

/// Returns the identifiers in the column for `status`.
#[must_use]
pub fn column_ids(board: &caseboard::board::domain::Board, status: TaskStatus) -> Vec<String> {
    board
        .column(status)
        .map(|column| {
            column
                .tasks()
                .iter()
                .map(|task| task.id().to_string())
                .collect()
        })
        .unwrap_or_default()
}
