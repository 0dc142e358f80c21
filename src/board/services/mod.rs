//! Board-level orchestration over both task stores.

mod board;

pub use board::{BoardService, BoardServiceError, BoardServiceResult};
