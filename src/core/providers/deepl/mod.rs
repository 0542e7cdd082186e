//! DeepL Provider
//!
//! Text translation through the DeepL v2 API.

mod client;
mod lang;

pub use client::DeepLTranslator;
pub use lang::TargetLang;
