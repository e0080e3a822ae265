//! Infrastructure layer for filesystem and environment interactions.
//!
//! Path handling for the Zellij plugin sandbox, where the host filesystem is
//! mounted under `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, strip_host_prefix, HOST_ROOT};
