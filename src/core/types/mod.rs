//! Core type definition module
//!
//! Contains the record model shared by the store, the runner and the transforms.

pub mod record;

pub use record::*;
