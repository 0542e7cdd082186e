//! Storage layer
//!
//! Line-delimited JSON persistence for datasets and run outputs.

/// JSONL record store
pub mod jsonl;

pub use jsonl::{AppendWriter, read_all, read_ids, write_all};
