//! State module
//!
//! Bookmarks emitted in STATE messages. All Transifex streams are full-table,
//! so bookmarks only record which contexts of a stream were completed.

mod types;

pub use types::{PartitionBookmark, State, StreamBookmark};
