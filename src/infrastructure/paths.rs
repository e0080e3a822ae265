//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host` (the cwd of
//! the last focused terminal, usually the user's home directory). Search ids keep
//! the sandbox form; everything shown to the user has the prefix removed.

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
pub const HOST_ROOT: &str = "/host";

/// Returns the data directory used for trace files.
///
/// Resolves to `/host/.local/share/zellij/fileseek` in the sandbox.
///
/// ```
/// use fileseek::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/fileseek"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/fileseek")
}

/// Maps `~` and `~/...` onto the sandbox host mount.
///
/// ```
/// use fileseek::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/code"), "/host/code");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp"), "/tmp");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

/// Removes the `/host` sandbox prefix for display.
///
/// Only strips a whole path component, so `/hostname` stays untouched.
///
/// ```
/// use fileseek::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/src/main.rs"), "/src/main.rs");
/// assert_eq!(strip_host_prefix("/host"), "/");
/// assert_eq!(strip_host_prefix("/hostname/x"), "/hostname/x");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix(HOST_ROOT) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}
