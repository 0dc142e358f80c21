//! Service cases and the two stores that own them.
//!
//! Service requests come from the backend; manual tasks are created by staff
//! and kept in a local store. A task's identifier records which store owns
//! it, and every mutation is routed to that store. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Transition and form controllers in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
