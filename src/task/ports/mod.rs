//! Port contracts for the two task stores.
//!
//! Local tasks and backend service requests are owned by separate stores.
//! Both hand out plain task sequences; neither knows about the other.

pub mod local_store;
pub mod service_requests;

pub use local_store::{LocalTaskStore, LocalTaskStoreError, LocalTaskStoreResult};
pub use service_requests::{ServiceRequestApi, ServiceRequestApiError, ServiceRequestApiResult};
