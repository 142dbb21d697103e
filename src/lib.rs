//! FindU - campus lost-and-found search
//!
//! Natural-language search over registered lost items: Korean date-phrase
//! resolution, synonym expansion, an optional language-model interpreter
//! for long ambiguous queries, and two-tier exact/expanded ranking, served
//! over HTTP.

pub mod cache;
pub mod cli;
pub mod core;
pub mod llm;
pub mod nlp;
pub mod query;
pub mod search;
pub mod store;
pub mod web;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use crate::search::SearchService;
