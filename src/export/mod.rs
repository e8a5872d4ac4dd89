//! Export functionality for recording data.
//!
//! Recordings are streamed from SQLite as JSON Lines, one recording per
//! line, in the same camelCase shape the API serializes.

mod jsonl;
mod types;
mod writer;

pub use jsonl::{export_jsonl, write_jsonl};
pub use types::ExportOptions;
