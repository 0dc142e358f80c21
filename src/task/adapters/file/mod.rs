//! File-backed local task store.
//!
//! Tasks are kept as one JSON array in `<dir>/<key>.json`, the on-disk
//! counterpart of a single key in a client-side key-value store. All access
//! goes through a capability-scoped directory handle.

use super::records::TaskRecord;
use crate::task::{
    domain::Task,
    ports::{LocalTaskStore, LocalTaskStoreError, LocalTaskStoreResult},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use tracing::{debug, warn};

/// Storage key used by the dashboard for manual tasks.
pub const DEFAULT_STORE_KEY: &str = "kanban_manual_tasks";

/// Local task store persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileLocalTaskStore {
    dir: Utf8PathBuf,
    file_name: String,
}

impl FileLocalTaskStore {
    /// Creates a store writing `<key>.json` inside `dir`.
    ///
    /// The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>, key: &str) -> Self {
        Self {
            dir: dir.into(),
            file_name: format!("{key}.json"),
        }
    }

    /// Returns the directory holding the task file.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Returns the name of the task file inside [`dir`](Self::dir).
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn run_blocking<F, T>(&self, f: F) -> LocalTaskStoreResult<T>
    where
        F: FnOnce(&Utf8Path, &str) -> LocalTaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = self.dir.clone();
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || f(&dir, &file_name))
            .await
            .map_err(LocalTaskStoreError::persistence)?
    }
}

#[async_trait]
impl LocalTaskStore for FileLocalTaskStore {
    async fn load(&self) -> LocalTaskStoreResult<Vec<Task>> {
        self.run_blocking(|dir, file_name| Ok(read_tasks(dir, file_name)))
            .await
    }

    async fn save(&self, tasks: &[Task]) -> LocalTaskStoreResult<()> {
        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from_task).collect();
        let payload =
            serde_json::to_string_pretty(&records).map_err(LocalTaskStoreError::persistence)?;
        self.run_blocking(move |dir, file_name| {
            write_atomically(dir, file_name, &payload).map_err(LocalTaskStoreError::persistence)
        })
        .await
    }
}

/// Reads the task file, degrading every failure to an empty list.
fn read_tasks(dir: &Utf8Path, file_name: &str) -> Vec<Task> {
    let contents = match Dir::open_ambient_dir(dir, ambient_authority())
        .and_then(|handle| handle.read_to_string(file_name))
    {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(%dir, file_name, "no local task file yet");
            return Vec::new();
        }
        Err(err) => {
            warn!(%dir, file_name, error = %err, "unreadable local task file, starting empty");
            return Vec::new();
        }
    };

    let records: Vec<TaskRecord> = match serde_json::from_str(&contents) {
        Ok(records) => records,
        Err(err) => {
            warn!(%dir, file_name, error = %err, "corrupt local task file, starting empty");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            record
                .into_local_task()
                .inspect_err(|err| warn!(id = %id, error = %err, "skipping local record"))
                .ok()
        })
        .collect()
}

/// Writes through a temporary file and renames it over the previous copy.
fn write_atomically(dir: &Utf8Path, file_name: &str, payload: &str) -> io::Result<()> {
    Dir::create_ambient_dir_all(dir, ambient_authority())?;
    let handle = Dir::open_ambient_dir(dir, ambient_authority())?;
    let temp_name = format!("{file_name}.tmp");
    handle.write(&temp_name, payload)?;
    handle.rename(&temp_name, &handle, file_name)
}
