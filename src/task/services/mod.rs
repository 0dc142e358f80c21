//! Controllers that mutate tasks.
//!
//! Both controllers decide the owning store from the task identifier alone:
//! local tasks are written to the local task store, service requests are
//! sent to the backend.

mod form;
mod routing;
mod transition;

pub use form::{
    FormMode, FormSession, FormSubmission, TaskForm, TaskFormError, TaskFormResult,
    TaskFormService,
};
pub use routing::MutationOutcome;
pub use transition::{TransitionError, TransitionRequest, TransitionResult, TransitionService};
