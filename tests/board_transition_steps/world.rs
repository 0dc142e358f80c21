//! Shared world state for board transition BDD scenarios.

use std::sync::Arc;

use caseboard::board::{
    domain::BoardLayout,
    services::{BoardService, BoardServiceError},
};
use caseboard::task::{
    adapters::memory::{InMemoryLocalTaskStore, InMemoryServiceRequestApi},
    domain::{CaseId, PersistedTaskData, RecordedStatus, Task, TaskFields, TaskId},
    services::MutationOutcome,
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::fixture;

/// Board service type used by the BDD world.
pub type TestBoard = BoardService<InMemoryServiceRequestApi, InMemoryLocalTaskStore, DefaultClock>;

/// Live board and the stores behind it.
pub struct LoadedBoard {
    pub api: Arc<InMemoryServiceRequestApi>,
    pub store: Arc<InMemoryLocalTaskStore>,
    pub board: TestBoard,
}

/// Scenario world for board behaviour tests.
#[derive(Default)]
pub struct BoardWorld {
    pub remote_seed: Vec<Task>,
    pub local_seed: Vec<Task>,
    pub loaded: Option<LoadedBoard>,
    pub last_move: Option<Result<MutationOutcome, BoardServiceError>>,
    pub last_created: Option<Task>,
}

impl BoardWorld {
    /// Returns the loaded board.
    ///
    /// # Errors
    ///
    /// Returns an error when no step has loaded the board yet.
    pub fn loaded(&self) -> Result<&LoadedBoard, eyre::Report> {
        self.loaded
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board has not been loaded in this scenario"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Builds a seeded task with `status` recorded verbatim.
///
/// # Errors
///
/// Returns an error when `id` is not a usable identifier.
pub fn seeded_task(id: &str, status: &str) -> Result<Task, eyre::Report> {
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::parse(id)?,
        case_id: CaseId::from_backend(format!("CASE-{id}")),
        fields: TaskFields::new(format!("Customer {id}")),
        status: RecordedStatus::from_raw(Some(status)),
        created_at: Some(Utc::now()),
    }))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Wires in-memory stores seeded from the world into a board service.
#[must_use]
pub fn build_board(remote: Vec<Task>, local: Vec<Task>) -> LoadedBoard {
    let api = Arc::new(InMemoryServiceRequestApi::with_requests(remote));
    let store = Arc::new(InMemoryLocalTaskStore::with_tasks(local));
    let board = BoardService::new(
        Arc::clone(&api),
        Arc::clone(&store),
        Arc::new(DefaultClock),
        BoardLayout::default(),
    );
    LoadedBoard { api, store, board }
}
