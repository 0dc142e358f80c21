//! Configuration loading.
//!
//! Settings come from an optional `caseboard.toml`. Every key has a default,
//! so a missing file behaves like an empty one.

use crate::board::domain::{BoardLayout, BoardLayoutError, ColumnSpec};
use crate::task::adapters::file::DEFAULT_STORE_KEY;
use crate::task::domain::{ParseTaskStatusError, TaskStatus};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the platform configuration directory.
pub const CONFIG_FILE_NAME: &str = "caseboard.toml";

/// Environment variable that replaces `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "CASEBOARD_BACKEND_URL";

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying error.
        source: Box<toml::de::Error>,
    },

    /// A column names an unknown status.
    #[error(transparent)]
    UnknownStatus(#[from] ParseTaskStatusError),

    /// The columns do not form a valid board.
    #[error(transparent)]
    Layout(#[from] BoardLayoutError),

    /// No home directory to derive default paths from.
    #[error("cannot determine a platform data directory; set store.dir explicitly")]
    NoDataDirectory,

    /// The platform directory is not valid UTF-8.
    #[error("platform directory is not valid UTF-8: {0}")]
    NonUtf8Path(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Service request backend.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Local task store.
    #[serde(default)]
    pub store: StoreConfig,

    /// Board columns in display order; empty means the built-in layout.
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the service request API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8001".to_owned()
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Local task store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the task file; defaults to the platform data dir.
    #[serde(default)]
    pub dir: Option<String>,

    /// Storage key, used as the file stem.
    #[serde(default = "default_store_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_store_key(),
        }
    }
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.to_owned()
}

/// One configured board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Status collected by the column.
    pub status: String,

    /// Heading; defaults to the built-in label.
    #[serde(default)]
    pub label: Option<String>,

    /// Color name; defaults to the built-in color.
    #[serde(default)]
    pub color: Option<String>,
}

impl BoardConfig {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. The default location may be absent, in
    /// which case defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        if let Some(explicit) = path {
            return Self::read(explicit);
        }
        let Some(default_path) = default_config_path() else {
            return Ok(Self::default());
        };
        match Self::read(&default_path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML.
    pub fn from_toml_str(path: &Utf8Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }

    fn read(path: &Utf8Path) -> Result<Self, ConfigError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let file_name = path.file_name().unwrap_or(CONFIG_FILE_NAME);
        let contents = Dir::open_ambient_dir(parent, ambient_authority())
            .and_then(|dir| dir.read_to_string(file_name))
            .map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?;
        Self::from_toml_str(path, &contents)
    }

    /// Replaces the backend URL when `url` is set and not blank.
    #[must_use]
    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        if let Some(value) = url.filter(|value| !value.trim().is_empty()) {
            self.backend.base_url = value.trim().to_owned();
        }
        self
    }

    /// Builds the validated board layout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown statuses or an invalid column set.
    pub fn layout(&self) -> Result<BoardLayout, ConfigError> {
        if self.columns.is_empty() {
            return Ok(BoardLayout::default());
        }
        let specs = self
            .columns
            .iter()
            .map(|column| {
                let status = TaskStatus::try_from(column.status.as_str())?;
                let defaults = ColumnSpec::default_for(status);
                Ok(ColumnSpec::new(
                    status,
                    column.label.as_deref().unwrap_or(defaults.label()),
                    column.color.as_deref().unwrap_or(defaults.color()),
                ))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(BoardLayout::new(specs)?)
    }

    /// Resolves the directory of the local task file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no directory is configured and the
    /// platform data directory cannot be determined.
    pub fn store_dir(&self) -> Result<Utf8PathBuf, ConfigError> {
        if let Some(dir) = &self.store.dir {
            return Ok(Utf8PathBuf::from(dir));
        }
        let dirs = project_dirs().ok_or(ConfigError::NoDataDirectory)?;
        Utf8PathBuf::from_path_buf(dirs.data_dir().to_path_buf())
            .map_err(|path| ConfigError::NonUtf8Path(path.display().to_string()))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "caseboard")
}

/// Returns the default configuration file path, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().join(CONFIG_FILE_NAME)).ok()
}
