//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A task identifier was empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// A backend identifier carries the reserved local-provenance prefix.
    #[error("remote task identifier '{0}' collides with the local task prefix")]
    ReservedRemoteId(String),

    /// A local identifier does not carry the local-provenance prefix.
    #[error("local task identifier '{0}' is missing the local task prefix")]
    NotALocalId(String),

    /// The price is negative or not a finite number.
    #[error("invalid price {0}, expected a non-negative amount")]
    InvalidPrice(String),

    /// The case sequence does not fit the three-digit format.
    #[error("case sequence {0} exceeds the three-digit range")]
    CaseSequenceOutOfRange(u16),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing device types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown device type: {0}")]
pub struct ParseDeviceTypeError(pub String);

/// Error returned while parsing urgency levels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown urgency: {0}")]
pub struct ParseUrgencyError(pub String);
