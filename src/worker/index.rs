//! File index backends.
//!
//! [`FileIndex`] is the seam between the worker and whatever answers a search.
//! [`WalkIndex`] answers it by walking the sandboxed filesystem.

use crate::domain::error::Result;
use crate::domain::{FileEntry, SearchRequestParams};
use crate::infrastructure::strip_host_prefix;
use crate::worker::SearchScope;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Anything that can answer a file search.
///
/// Implementations return at most `params.limit` entries, never set
/// `is_openable_in_editor`, and treat a blank query as "no results".
pub trait FileIndex: Send {
    /// Runs one search below `scope.root`.
    ///
    /// # Errors
    ///
    /// Returns an error when the root itself cannot be read.
    fn search(&self, params: &SearchRequestParams, scope: &SearchScope) -> Result<Vec<FileEntry>>;
}

/// Breadth-first filesystem walk with fuzzy name matching.
///
/// Entries directly below the root are at depth 1; directories are descended
/// into while their children stay within `params.depth`. Siblings are visited
/// in name order, so results are stable for an unchanged tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkIndex;

impl WalkIndex {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileIndex for WalkIndex {
    #[tracing::instrument(level = "debug", skip(self, params, scope), fields(query = %params.query, root = %scope.root))]
    fn search(&self, params: &SearchRequestParams, scope: &SearchScope) -> Result<Vec<FileEntry>> {
        let query = params.query.trim();
        if query.is_empty() || params.limit == 0 {
            return Ok(vec![]);
        }

        let root = PathBuf::from(&scope.root);
        let matcher = SkimMatcherV2::default().smart_case();
        let mut files = Vec::new();
        let mut queue: VecDeque<(PathBuf, u32)> = VecDeque::new();
        let mut scanned = 0usize;

        let mut children = read_sorted(&root)?;
        let mut level = 1;

        loop {
            for (path, is_directory) in children {
                scanned += 1;
                let name = file_name(&path);
                if is_directory && scope.ignore.iter().any(|ignored| *ignored == name) {
                    continue;
                }

                let wanted = if is_directory { params.include_directories } else { params.include_files };
                if wanted && matcher.fuzzy_match(&name, query).is_some() {
                    files.push(to_entry(&path, name, is_directory));
                    if files.len() >= params.limit {
                        tracing::debug!(scanned, matches = files.len(), "search limit reached");
                        return Ok(files);
                    }
                }

                if is_directory && level < params.depth {
                    queue.push_back((path, level + 1));
                }
            }

            let Some((dir, dir_level)) = queue.pop_front() else {
                break;
            };
            level = dir_level;
            children = match read_sorted(&dir) {
                Ok(children) => children,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                    vec![]
                }
            };
        }

        tracing::debug!(scanned, matches = files.len(), "search walk finished");
        Ok(files)
    }
}

/// Lists a directory as `(path, is_directory)` pairs sorted by path.
///
/// Symlinks are reported as files so the walk never follows them.
fn read_sorted(dir: &Path) -> Result<Vec<(PathBuf, bool)>> {
    let mut children = fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let is_directory = entry.file_type().ok()?.is_dir();
            Some((entry.path(), is_directory))
        })
        .collect::<Vec<_>>();
    children.sort();
    Ok(children)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn to_entry(path: &Path, name: String, is_directory: bool) -> FileEntry {
    let id = path.to_string_lossy().into_owned();
    let display = strip_host_prefix(&id);
    FileEntry::new(id, name, display, is_directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchRequestParams;
    use std::fs::{create_dir_all, write};
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        create_dir_all(root.join("src/app")).unwrap();
        create_dir_all(root.join("node_modules/pkg")).unwrap();
        create_dir_all(root.join("a/b/c/d/e/f")).unwrap();
        write(root.join("main.py"), "").unwrap();
        write(root.join("src/main.rs"), "").unwrap();
        write(root.join("src/app/state.rs"), "").unwrap();
        write(root.join("node_modules/pkg/main.js"), "").unwrap();
        write(root.join("a/b/c/d/deep_main.txt"), "").unwrap();
        write(root.join("a/b/c/d/e/f/deepest_main.txt"), "").unwrap();
        dir
    }

    fn scope(dir: &TempDir) -> SearchScope {
        SearchScope {
            root: dir.path().to_string_lossy().into_owned(),
            ignore: vec!["node_modules".to_string()],
        }
    }

    fn names(files: &[FileEntry]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn finds_matches_breadth_first_within_depth() {
        let dir = tree();
        let files = WalkIndex::new()
            .search(&SearchRequestParams::for_query("main"), &scope(&dir))
            .unwrap();

        assert_eq!(names(&files), vec!["main.py", "main.rs", "deep_main.txt"]);
        assert!(files.iter().all(|f| !f.is_openable_in_editor));
        assert!(files[0].id.ends_with("main.py"));
    }

    #[test]
    fn skips_ignored_directories() {
        let dir = tree();
        let files = WalkIndex::new()
            .search(&SearchRequestParams::for_query("main.js"), &scope(&dir))
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn honours_the_limit() {
        let dir = tree();
        let mut params = SearchRequestParams::for_query("main");
        params.limit = 2;
        let files = WalkIndex::new().search(&params, &scope(&dir)).unwrap();
        assert_eq!(names(&files), vec!["main.py", "main.rs"]);
    }

    #[test]
    fn honours_include_flags() {
        let dir = tree();
        let mut params = SearchRequestParams::for_query("src");
        params.include_directories = false;
        assert!(WalkIndex::new().search(&params, &scope(&dir)).unwrap().is_empty());

        params.include_directories = true;
        params.include_files = false;
        let files = WalkIndex::new().search(&params, &scope(&dir)).unwrap();
        assert_eq!(names(&files), vec!["src"]);
        assert!(files[0].is_directory);
    }

    #[test]
    fn blank_query_returns_nothing_without_walking() {
        let files = WalkIndex::new()
            .search(
                &SearchRequestParams::for_query("  "),
                &SearchScope { root: "/definitely/not/here".to_string(), ignore: vec![] },
            )
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn unreadable_root_is_an_error() {
        let result = WalkIndex::new().search(
            &SearchRequestParams::for_query("main"),
            &SearchScope { root: "/definitely/not/here".to_string(), ignore: vec![] },
        );
        assert!(result.is_err());
    }
}
