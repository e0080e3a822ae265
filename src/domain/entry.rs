//! File search domain model.
//!
//! This module defines the two values that cross the boundary between the
//! picker dialog and the file index: the immutable [`SearchRequestParams`] sent
//! for every search attempt, and the [`FileEntry`] rows the index answers with.

use serde::{Deserialize, Serialize};

/// Maximum directory depth the index descends below the search root.
pub const SEARCH_DEPTH: u32 = 5;

/// Maximum number of entries returned for a single search.
pub const SEARCH_LIMIT: usize = 50;

/// Parameters for one search attempt.
///
/// Built fresh from the current query each time the debounce timer fires. The
/// flags and caps are fixed; only `query` varies between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequestParams {
    /// Raw query text as typed by the user.
    pub query: String,
    /// Whether regular files may appear in the results.
    pub include_files: bool,
    /// Whether directories may appear in the results.
    pub include_directories: bool,
    /// Maximum walk depth below the root.
    pub depth: u32,
    /// Maximum number of entries to return.
    pub limit: usize,
}

impl SearchRequestParams {
    /// Builds the request for `query` using the fixed search constants.
    ///
    /// # Example
    ///
    /// ```
    /// use fileseek::domain::{SearchRequestParams, SEARCH_DEPTH, SEARCH_LIMIT};
    ///
    /// let params = SearchRequestParams::for_query("main");
    /// assert_eq!(params.query, "main");
    /// assert!(params.include_files && params.include_directories);
    /// assert_eq!((params.depth, params.limit), (SEARCH_DEPTH, SEARCH_LIMIT));
    /// ```
    #[must_use]
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            include_files: true,
            include_directories: true,
            depth: SEARCH_DEPTH,
            limit: SEARCH_LIMIT,
        }
    }
}

/// One matched file or directory.
///
/// # Fields
///
/// - `id`: Unique, stable identifier (the sandbox path of the entry)
/// - `name`: Final path component
/// - `path`: Path as shown to the user (sandbox prefix stripped)
/// - `is_directory`: Whether the entry is a directory
/// - `is_openable_in_editor`: Never set by the search path; computing it per
///   entry is too slow for interactive search, so every selection is routed to
///   the viewer panel instead of the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    #[serde(default)]
    pub is_openable_in_editor: bool,
}

impl FileEntry {
    /// Creates an entry as the search path produces it (not editor-openable).
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>, is_directory: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            is_directory,
            is_openable_in_editor: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entries_are_never_editor_openable() {
        let entry = FileEntry::new("/host/main.py", "main.py", "/main.py", false);
        assert!(!entry.is_openable_in_editor);
    }

    #[test]
    fn missing_editor_flag_deserializes_as_false() {
        let json = r#"{"id":"1","name":"main.py","path":"/main.py","is_directory":false}"#;
        let entry: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, FileEntry::new("1", "main.py", "/main.py", false));
    }
}
