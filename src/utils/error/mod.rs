//! Error Handling utilities
//!
//! Crate-wide error type and result alias.

pub mod error;

pub use error::*;
