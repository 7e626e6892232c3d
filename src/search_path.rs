//! The ordered list of directories used to find commands given by bare name.

use crate::external::is_executable_file;
use std::path::{Path, PathBuf};

/// Directory searched when the shell starts.
pub const DEFAULT_DIR: &str = "/bin";

/// Ordered directories searched for commands; the first match wins.
///
/// Duplicates are allowed and an empty list is legal, in which case no bare
/// command name resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<String>,
}

impl SearchPath {
    /// A search path holding only [`DEFAULT_DIR`].
    pub fn new() -> Self {
        Self {
            dirs: vec![DEFAULT_DIR.to_string()],
        }
    }

    /// Discard every entry and install `dirs` in the given order.
    pub fn replace<I, S>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs = dirs.into_iter().map(Into::into).collect();
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Find the first `dir/name` that is an executable regular file.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| Path::new(dir).join(name))
            .find(|candidate| is_executable_file(candidate))
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_executable;
    use tempfile::TempDir;

    #[test]
    fn starts_with_bin() {
        assert_eq!(SearchPath::new().dirs(), ["/bin"]);
    }

    #[test]
    fn replace_installs_entries_in_order() {
        let mut path = SearchPath::new();
        path.replace(["/usr/bin", "/bin", "/usr/bin"]);
        assert_eq!(path.dirs(), ["/usr/bin", "/bin", "/usr/bin"]);

        path.replace(Vec::<String>::new());
        assert!(path.is_empty());
    }

    #[test]
    fn first_match_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_executable(first.path(), "tool");
        write_executable(second.path(), "tool");

        let mut path = SearchPath::new();
        path.replace([
            second.path().to_string_lossy().into_owned(),
            first.path().to_string_lossy().into_owned(),
        ]);
        assert_eq!(path.resolve("tool"), Some(second.path().join("tool")));
    }

    #[test]
    fn skips_files_without_execute_permission() {
        let dir = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tool"), "plain data").unwrap();
        write_executable(fallback.path(), "tool");

        let mut path = SearchPath::new();
        path.replace([
            dir.path().to_string_lossy().into_owned(),
            fallback.path().to_string_lossy().into_owned(),
        ]);
        assert_eq!(path.resolve("tool"), Some(fallback.path().join("tool")));
    }

    #[test]
    fn empty_path_resolves_nothing() {
        let mut path = SearchPath::new();
        path.replace(Vec::<String>::new());
        assert_eq!(path.resolve("sh"), None);
    }

    #[test]
    fn missing_command_resolves_nothing() {
        let dir = TempDir::new().unwrap();
        let mut path = SearchPath::new();
        path.replace([dir.path().to_string_lossy().into_owned()]);
        assert_eq!(path.resolve("no_such_tool"), None);
    }
}
