//! Unit tests for the task module.

mod record_tests;
