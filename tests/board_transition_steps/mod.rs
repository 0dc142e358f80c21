//! Step definitions for board transition scenarios.

mod given;
mod then;
mod when;
pub mod world;
