//! Identifier types for the task domain.
//!
//! Task ownership is carried by [`TaskId`]: a local task lives in the local
//! task store, a remote task belongs to the service-request backend. The
//! `manual_` prefix of local identifiers only matters when parsing an
//! identifier that crossed a boundary as a plain string.

use super::TaskDomainError;
use std::fmt;

/// Prefix marking identifiers of locally created tasks.
pub const LOCAL_ID_PREFIX: &str = "manual_";

/// Prefix of locally generated case codes.
const CASE_ID_PREFIX: &str = "DL";

/// Largest sequence representable in the three-digit case suffix.
pub const MAX_CASE_SEQUENCE: u16 = 999;

/// Which store owns a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Owned by the local task store.
    Local,
    /// Owned by the service-request backend.
    Remote,
}

impl Provenance {
    /// Returns a short label for logs and rendering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a locally created task, always `manual_<disambiguator>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalTaskId(String);

impl LocalTaskId {
    /// Builds a local identifier from a millisecond timestamp.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{millis}"))
    }

    /// Parses a persisted local identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotALocalId`] when the value lacks the
    /// local prefix or has nothing after it.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        match trimmed.strip_prefix(LOCAL_ID_PREFIX) {
            Some(rest) if !rest.is_empty() => Ok(Self(trimmed.to_owned())),
            _ => Err(TaskDomainError::NotALocalId(value.to_owned())),
        }
    }

    /// Returns the numeric disambiguator when it is a plain timestamp.
    #[must_use]
    pub fn millis(&self) -> Option<i64> {
        self.0
            .strip_prefix(LOCAL_ID_PREFIX)
            .and_then(|rest| rest.parse().ok())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier assigned by the service-request backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteTaskId(String);

impl RemoteTaskId {
    /// Creates a validated backend identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskId`] for blank values and
    /// [`TaskDomainError::ReservedRemoteId`] when the value would be mistaken
    /// for a local identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskId);
        }
        if trimmed.starts_with(LOCAL_ID_PREFIX) {
            return Err(TaskDomainError::ReservedRemoteId(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task identifier tagged with the owning store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskId {
    /// Locally created task.
    Local(LocalTaskId),
    /// Backend service request.
    Remote(RemoteTaskId),
}

impl TaskId {
    /// Classifies an identifier received as a plain string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskId`] for blank input or
    /// [`TaskDomainError::NotALocalId`] for a bare `manual_` prefix.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        if value.trim().starts_with(LOCAL_ID_PREFIX) {
            LocalTaskId::parse(value).map(Self::Local)
        } else {
            RemoteTaskId::new(value).map(Self::Remote)
        }
    }

    /// Returns the owning store.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        match self {
            Self::Local(_) => Provenance::Local,
            Self::Remote(_) => Provenance::Remote,
        }
    }

    /// Returns the externally visible identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Local(id) => id.as_str(),
            Self::Remote(id) => id.as_str(),
        }
    }
}

impl From<LocalTaskId> for TaskId {
    fn from(id: LocalTaskId) -> Self {
        Self::Local(id)
    }
}

impl From<RemoteTaskId> for TaskId {
    fn from(id: RemoteTaskId) -> Self {
        Self::Remote(id)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable case code shown on cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CaseId(String);

impl CaseId {
    /// Wraps a backend-defined case code as-is.
    #[must_use]
    pub fn from_backend(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    /// Builds a local case code `DL<year><sequence>`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CaseSequenceOutOfRange`] when the sequence
    /// needs more than three digits.
    pub fn local(year: i32, sequence: u16) -> Result<Self, TaskDomainError> {
        if sequence > MAX_CASE_SEQUENCE {
            return Err(TaskDomainError::CaseSequenceOutOfRange(sequence));
        }
        Ok(Self(format!("{CASE_ID_PREFIX}{year}{sequence:03}")))
    }

    /// Returns the three-digit sequence when this is a local code for `year`.
    #[must_use]
    pub fn local_sequence(&self, year: i32) -> Option<u16> {
        let rest = self
            .0
            .strip_prefix(CASE_ID_PREFIX)?
            .strip_prefix(year.to_string().as_str())?;
        if rest.len() != 3 || !rest.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        rest.parse().ok()
    }

    /// Returns the case code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether no case code was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
