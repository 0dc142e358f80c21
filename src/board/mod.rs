//! The operations board.
//!
//! Merges backend service requests and local tasks into status columns and
//! routes card moves and form submissions back to the owning store.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
