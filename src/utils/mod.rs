//! Utility modules
//!
//! - **error**: Error types and the crate `Result` alias

pub mod error;
