//! Adapters for the local task store and the service request backend.
//!
//! - [`memory`]: in-memory stores for tests and offline demos
//! - [`file`]: JSON file local task store
//! - [`http`]: `ureq` client for the backend REST API
//! - [`records`]: the JSON record shape both persistent adapters share

pub mod file;
pub mod http;
pub mod memory;
pub mod records;
