//! Task creation and editing from raw form input.

use super::routing::{MutationOutcome, route_patch};
use crate::task::{
    domain::{
        CaseId, DeviceType, LocalTaskId, MAX_CASE_SEQUENCE, ParseDeviceTypeError, Price, Task,
        TaskDomainError, TaskFields, TaskId, TaskPatch, UnrecognizedValues, Urgency,
        parse_date_lenient,
    },
    ports::{LocalTaskStore, LocalTaskStoreError, ServiceRequestApi, ServiceRequestApiError},
};
use chrono::{Datelike, NaiveDate};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Raw field values as typed into the task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Customer name (required).
    pub name: String,
    /// Customer phone number.
    pub phone: String,
    /// Customer email address.
    pub email: String,
    /// Device type identifier (required).
    pub device_type: String,
    /// Reported problem.
    pub problem_description: String,
    /// Urgency identifier.
    pub urgency: String,
    /// Price text.
    pub price: String,
    /// Work start date, `YYYY-MM-DD`.
    pub started_at: String,
    /// Work completion date, `YYYY-MM-DD`.
    pub completed_at: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            device_type: String::new(),
            problem_description: String::new(),
            urgency: Urgency::Medium.as_str().to_owned(),
            price: String::new(),
            started_at: String::new(),
            completed_at: String::new(),
        }
    }
}

impl TaskForm {
    /// Prefills the form from an existing task for editing.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        let fields = task.fields();
        Self {
            name: fields.name.clone(),
            phone: fields.phone.clone().unwrap_or_default(),
            email: fields.email.clone().unwrap_or_default(),
            device_type: fields
                .device_type
                .map(|device| device.as_str().to_owned())
                .unwrap_or_default(),
            problem_description: fields.problem_description.clone(),
            urgency: fields.urgency.as_str().to_owned(),
            price: fields.price.map(|price| price.to_string()).unwrap_or_default(),
            started_at: fields.started_at.map(format_date).unwrap_or_default(),
            completed_at: fields.completed_at.map(format_date).unwrap_or_default(),
        }
    }

    /// Returns whether the required fields are filled in.
    ///
    /// Front ends disable their submit control while this is `false`.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty() && !self.device_type.trim().is_empty()
    }

    /// Converts the raw values into canonical task fields.
    ///
    /// Unparsable prices and dates read as absent, blank optional text reads
    /// as absent and unknown urgency reads as `medium`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFormError::MissingField`] for a blank name or device
    /// type, and [`TaskFormError::InvalidDeviceType`] for an unknown device.
    pub fn normalize(&self) -> Result<TaskFields, TaskFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TaskFormError::MissingField("name"));
        }
        let device_input = self.device_type.trim();
        if device_input.is_empty() {
            return Err(TaskFormError::MissingField("device_type"));
        }
        let device_type = DeviceType::try_from(device_input)?;

        Ok(TaskFields {
            name: name.to_owned(),
            phone: optional_text(&self.phone),
            email: optional_text(&self.email),
            device_type: Some(device_type),
            problem_description: self.problem_description.trim().to_owned(),
            urgency: Urgency::from_raw(Some(self.urgency.as_str())),
            price: Price::parse_lenient(&self.price),
            started_at: parse_date_lenient(&self.started_at),
            completed_at: parse_date_lenient(&self.completed_at),
            unrecognized: UnrecognizedValues::default(),
        })
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Errors returned by form validation and submission.
#[derive(Debug, Error)]
pub enum TaskFormError {
    /// A required field is blank.
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),
    /// The device type is not one of the known devices.
    #[error(transparent)]
    InvalidDeviceType(#[from] ParseDeviceTypeError),
    /// Generated identifiers were rejected by the domain.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Every three-digit case number for the year is taken.
    #[error("no free case number left for {0}")]
    CaseNumbersExhausted(i32),
    /// Submit was called with no form open.
    #[error("no task form is open")]
    NoOpenForm,
    /// The local task store failed.
    #[error(transparent)]
    LocalStore(#[from] LocalTaskStoreError),
    /// The backend rejected or never received the update.
    #[error(transparent)]
    Remote(#[from] ServiceRequestApiError),
}

/// Result type for form operations.
pub type TaskFormResult<T> = Result<T, TaskFormError>;

/// Creates local tasks and edits tasks of either provenance.
#[derive(Clone)]
pub struct TaskFormService<A, S, C>
where
    A: ServiceRequestApi,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<A, S, C> TaskFormService<A, S, C>
where
    A: ServiceRequestApi,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a form service.
    #[must_use]
    pub const fn new(api: Arc<A>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self { api, store, clock }
    }

    /// Creates a pending local task from `form` and appends it to the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFormError`] when validation fails, no case number is
    /// free, or the store write fails.
    pub async fn create(&self, form: &TaskForm) -> TaskFormResult<Task> {
        self.create_reserving(form, &[]).await
    }

    /// Creates a local task whose case code avoids both the local store and
    /// `reserved`, typically the case codes of fetched service requests.
    ///
    /// # Errors
    ///
    /// See [`TaskFormService::create`].
    pub async fn create_reserving(
        &self,
        form: &TaskForm,
        reserved: &[CaseId],
    ) -> TaskFormResult<Task> {
        let fields = form.normalize()?;
        let now = self.clock.utc();
        let existing = self.store.load().await?;

        let id = next_local_id(&existing, now.timestamp_millis());
        let year = now.year();
        let taken = existing.iter().map(Task::case_id).chain(reserved);
        let sequence =
            next_case_sequence(taken, year).ok_or(TaskFormError::CaseNumbersExhausted(year))?;
        let case_id = CaseId::local(year, sequence)?;

        let task = Task::new_local(id, case_id, fields, now);
        self.store.append(&task).await?;
        info!(task_id = %task.id(), case_id = %task.case_id(), "local task created");
        Ok(task)
    }

    /// Replaces the editable fields of `original` with the form values.
    ///
    /// Identity, case code, creation time and status are preserved; status
    /// only changes through transitions. Device type and urgency values the
    /// crate does not recognise survive when the form leaves them as
    /// prefilled. Routed to the owning store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFormError`] when validation fails or the owning store
    /// rejects the change. On error nothing local has changed.
    pub async fn edit(
        &self,
        original: &Task,
        form: &TaskForm,
    ) -> TaskFormResult<(Task, MutationOutcome)> {
        let fields = form.normalize()?.keeping_unrecognized(original.fields());
        let patch = TaskPatch::Fields(fields);
        let updated = original.patched(patch.clone());
        let outcome =
            route_patch::<_, _, TaskFormError>(&*self.api, &*self.store, original.id(), patch)
                .await?;
        Ok((updated, outcome))
    }
}

/// Picks a local identifier that sorts after every existing timestamp one.
fn next_local_id(existing: &[Task], now_millis: i64) -> LocalTaskId {
    let latest = existing
        .iter()
        .filter_map(|task| match task.id() {
            TaskId::Local(local) => local.millis(),
            TaskId::Remote(_) => None,
        })
        .max();
    let millis = latest.map_or(now_millis, |last| last.saturating_add(1).max(now_millis));
    LocalTaskId::from_millis(millis)
}

/// Picks the next free three-digit case sequence for `year`.
///
/// Numbering starts at 1 and continues after the highest sequence in use;
/// once that reaches the end of the range, reuses the lowest gap.
fn next_case_sequence<'a>(taken: impl Iterator<Item = &'a CaseId>, year: i32) -> Option<u16> {
    let used: BTreeSet<u16> = taken
        .filter_map(|case_id| case_id.local_sequence(year))
        .collect();
    match used.last() {
        None => Some(1),
        Some(&last) if last < MAX_CASE_SEQUENCE => Some(last.saturating_add(1)),
        Some(_) => (1..MAX_CASE_SEQUENCE).find(|candidate| !used.contains(candidate)),
    }
}

/// Which form, if any, is open.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormMode {
    /// No form is open.
    #[default]
    Closed,
    /// Creating a new local task.
    Creating,
    /// Editing an existing task.
    Editing(Box<Task>),
}

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    /// A local task was created.
    Created(Task),
    /// A task was edited.
    Edited {
        /// The task with the new field values.
        task: Task,
        /// Where the change went.
        outcome: MutationOutcome,
    },
}

impl FormSubmission {
    /// Returns whether the caller must re-fetch service requests.
    #[must_use]
    pub const fn requires_refetch(&self) -> bool {
        match self {
            Self::Created(_) => false,
            Self::Edited { outcome, .. } => outcome.requires_refetch(),
        }
    }
}

/// In-progress form state for one operator.
///
/// A successful submit resets the draft and closes the form; a failed one
/// keeps both so the operator can retry.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    mode: FormMode,
    draft: TaskForm,
}

impl FormSession {
    /// Creates a session with no form open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty creation form.
    pub fn open_create(&mut self) {
        self.mode = FormMode::Creating;
        self.draft = TaskForm::default();
    }

    /// Opens an edit form prefilled from `task`.
    pub fn open_edit(&mut self, task: Task) {
        self.draft = TaskForm::from_task(&task);
        self.mode = FormMode::Editing(Box::new(task));
    }

    /// Closes the form and discards the draft.
    pub fn cancel(&mut self) {
        self.mode = FormMode::Closed;
        self.draft = TaskForm::default();
    }

    /// Returns the open form mode.
    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Returns the current draft.
    #[must_use]
    pub const fn draft(&self) -> &TaskForm {
        &self.draft
    }

    /// Returns the draft for editing.
    pub fn draft_mut(&mut self) -> &mut TaskForm {
        &mut self.draft
    }

    /// Returns whether submit should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.mode != FormMode::Closed && self.draft.is_submittable()
    }

    /// Submits the draft to `service` according to the open mode.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFormError::NoOpenForm`] when no form is open, or the
    /// service error. The session is left unchanged on error.
    pub async fn submit<A, S, C>(
        &mut self,
        service: &TaskFormService<A, S, C>,
    ) -> TaskFormResult<FormSubmission>
    where
        A: ServiceRequestApi,
        S: LocalTaskStore,
        C: Clock + Send + Sync,
    {
        self.submit_reserving(service, &[]).await
    }

    /// Submits the draft; a created task's case code also avoids `reserved`.
    ///
    /// # Errors
    ///
    /// See [`FormSession::submit`].
    pub async fn submit_reserving<A, S, C>(
        &mut self,
        service: &TaskFormService<A, S, C>,
        reserved: &[CaseId],
    ) -> TaskFormResult<FormSubmission>
    where
        A: ServiceRequestApi,
        S: LocalTaskStore,
        C: Clock + Send + Sync,
    {
        let submission = match &self.mode {
            FormMode::Closed => return Err(TaskFormError::NoOpenForm),
            FormMode::Creating => {
                FormSubmission::Created(service.create_reserving(&self.draft, reserved).await?)
            }
            FormMode::Editing(original) => {
                let (task, outcome) = service.edit(original, &self.draft).await?;
                FormSubmission::Edited { task, outcome }
            }
        };
        self.cancel();
        Ok(submission)
    }
}
