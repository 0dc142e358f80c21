//! JSON record shape shared by the backend API and the local task file.
//!
//! Records are deliberately loose: every field except `id` may be missing,
//! and fields that fail to parse read as absent rather than rejecting the
//! whole record. They are the boundary between wire data and the domain.

use crate::task::domain::{
    CaseId, DeviceType, LocalTaskId, PersistedTaskData, Price, RecordedStatus, RemoteTaskId, Task,
    TaskDomainError, TaskFields, TaskId, TaskPatch, UnrecognizedValues, Urgency,
    parse_date_lenient,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

/// One task as it appears on the wire or on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    /// Task identifier; numeric backend identifiers are read as text.
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    /// Case code.
    pub case_id: Option<String>,
    /// Customer name.
    pub name: Option<String>,
    /// Customer phone number.
    pub phone: Option<String>,
    /// Customer email address.
    pub email: Option<String>,
    /// Device type.
    pub device_type: Option<String>,
    /// Reported problem.
    pub problem_description: Option<String>,
    /// Urgency level.
    pub urgency: Option<String>,
    /// Price as a number, or text from older clients.
    pub price: Option<Value>,
    /// Work start date or datetime.
    pub started_at: Option<String>,
    /// Work completion date or datetime.
    pub completed_at: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Lifecycle status.
    pub status: Option<String>,
}

impl TaskRecord {
    /// Converts a backend record into a remote task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the identifier is blank or carries
    /// the local-task prefix.
    pub fn into_remote_task(self) -> Result<Task, TaskDomainError> {
        let id = RemoteTaskId::new(self.id.as_str())?;
        Ok(self.into_task(TaskId::Remote(id)))
    }

    /// Converts a persisted local record into a local task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotALocalId`] when the identifier does not
    /// carry the local-task prefix.
    pub fn into_local_task(self) -> Result<Task, TaskDomainError> {
        let id = LocalTaskId::parse(&self.id)?;
        Ok(self.into_task(TaskId::Local(id)))
    }

    fn into_task(self, id: TaskId) -> Task {
        let fields = TaskFields {
            name: self.name.unwrap_or_default(),
            phone: non_blank(self.phone),
            email: non_blank(self.email),
            device_type: DeviceType::from_raw(self.device_type.as_deref()),
            problem_description: self.problem_description.unwrap_or_default(),
            urgency: Urgency::from_raw(self.urgency.as_deref()),
            price: self.price.as_ref().and_then(price_from_value),
            started_at: self.started_at.as_deref().and_then(parse_date_lenient),
            completed_at: self.completed_at.as_deref().and_then(parse_date_lenient),
            unrecognized: UnrecognizedValues::capture(
                self.device_type.as_deref(),
                self.urgency.as_deref(),
            ),
        };
        Task::from_persisted(PersistedTaskData {
            id,
            case_id: CaseId::from_backend(self.case_id.unwrap_or_default()),
            fields,
            status: RecordedStatus::from_raw(self.status.as_deref()),
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
        })
    }

    /// Builds the record written for `task`.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        let fields = task.fields();
        Self {
            id: task.id().as_str().to_owned(),
            case_id: Some(task.case_id().as_str().to_owned()),
            name: Some(fields.name.clone()),
            phone: fields.phone.clone(),
            email: fields.email.clone(),
            device_type: fields.device_type_value().map(str::to_owned),
            problem_description: Some(fields.problem_description.clone()),
            urgency: Some(fields.urgency_value().to_owned()),
            price: fields.price.map(|price| json!(price.amount())),
            started_at: fields.started_at.map(format_date),
            completed_at: fields.completed_at.map(format_date),
            created_at: task
                .created_at()
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            status: Some(task.status().as_str().to_owned()),
        }
    }
}

/// Builds the JSON body sent to the backend for a partial update.
#[must_use]
pub fn patch_body(patch: &TaskPatch) -> Value {
    match patch {
        TaskPatch::Status(status) => json!({ "status": status.as_str() }),
        TaskPatch::Fields(fields) => json!({
            "name": fields.name,
            "phone": fields.phone,
            "email": fields.email,
            "device_type": fields.device_type_value(),
            "problem_description": fields.problem_description,
            "urgency": fields.urgency_value(),
            "price": fields.price.map(Price::amount),
            "started_at": fields.started_at.map(format_date),
            "completed_at": fields.completed_at.map(format_date),
        }),
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or numeric id, found {other}"
        ))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn price_from_value(value: &Value) -> Option<Price> {
    match value {
        Value::Number(number) => number.as_f64().and_then(|amount| Price::new(amount).ok()),
        Value::String(text) => Price::parse_lenient(text),
        _ => None,
    }
}

/// Reads RFC 3339 timestamps, or naive ISO datetimes as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
