//! Board model: column layout and the merge of both task sources.

mod age;
mod error;
mod layout;
mod partition;

pub use age::CardAge;
pub use error::BoardLayoutError;
pub use layout::{BoardLayout, ColumnSpec};
pub use partition::{Board, BoardColumn, partition};
