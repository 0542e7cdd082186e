//! Capability traits
//!
//! The seams between the batch runner and the external providers.

pub mod adapter;

pub use adapter::{Responder, Translator};
