//! Caseboard: operations board for a device-repair shop.
//!
//! Service cases come from two independently owned stores: customer service
//! requests held by a remote backend, and tasks created by staff that live
//! only in a local store. The board merges both into status columns and
//! sends every mutation back to the store that owns the task.
//!
//! # Architecture
//!
//! Caseboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for both task stores
//! - **Adapters**: File, HTTP and in-memory implementations of those ports
//!
//! # Modules
//!
//! - [`task`]: Task model, store ports and the transition and form controllers
//! - [`board`]: Column layout, the merge and partition engine, board service
//! - [`config`]: TOML configuration

pub mod board;
pub mod config;
pub mod task;
