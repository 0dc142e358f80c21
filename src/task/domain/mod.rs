//! Domain model for service cases on the board.
//!
//! A task is either a backend service request or a manual task created by
//! staff. Which store owns it is part of its identifier and never changes.

mod error;
mod fields;
mod ids;
mod status;
mod task;

pub use error::{ParseDeviceTypeError, ParseTaskStatusError, ParseUrgencyError, TaskDomainError};
pub use fields::{
    DeviceType, Price, TaskFields, UnrecognizedValues, Urgency, parse_date_lenient,
};
pub use ids::{
    CaseId, LOCAL_ID_PREFIX, LocalTaskId, MAX_CASE_SEQUENCE, Provenance, RemoteTaskId, TaskId,
};
pub use status::{RecordedStatus, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskPatch};
