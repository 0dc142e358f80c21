//! In-memory adapters for tests and offline demos.

mod local_store;
mod service_requests;

pub use local_store::InMemoryLocalTaskStore;
pub use service_requests::{InMemoryServiceRequestApi, RecordedUpdate};
