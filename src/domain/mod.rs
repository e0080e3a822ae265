//! Domain layer for the fileseek plugin.
//!
//! Core types independent of Zellij APIs: the search request/result model and
//! the crate error type.
//!
//! # Organization
//!
//! - [`entry`]: `FileEntry` and `SearchRequestParams`
//! - [`error`]: Error types and result alias

pub mod entry;
pub mod error;

pub use entry::{FileEntry, SearchRequestParams, SEARCH_DEPTH, SEARCH_LIMIT};
pub use error::{FileSeekError, Result};
