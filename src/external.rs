use crate::command::Segment;
use crate::error::ShellError;
use crate::search_path::SearchPath;
use nix::unistd::{AccessFlags, access};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Everything needed to start a command that is not a builtin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    /// Resolved location of the program image.
    pub program: PathBuf,
    /// Full argument vector, `argv[0]` being the name as the user typed it.
    pub argv: Vec<String>,
    /// File receiving standard output and standard error.
    pub redirect: Option<String>,
}

impl ExternalCommand {
    /// Resolve the segment's command name and build the spawn configuration.
    pub fn resolve(search_path: &SearchPath, segment: Segment) -> Result<Self, ShellError> {
        let program = find_command_path(search_path, segment.name())
            .ok_or_else(|| ShellError::NotFound(segment.name().to_string()))?
            .into_owned();
        Ok(Self {
            program,
            argv: segment.argv,
            redirect: segment.redirect,
        })
    }
}

/// Resolve a command name the way this shell does.
///
/// Behavior:
/// - A name containing `/` is an explicit path, absolute or relative to the
///   working directory. It is returned as is if it names an executable file;
///   the search path is not consulted.
/// - Any other name is looked up in `search_path`, first match wins.
/// - Empty name: returns `None`.
pub fn find_command_path<'a>(search_path: &SearchPath, name: &'a str) -> Option<Cow<'a, Path>> {
    if name.is_empty() {
        return None;
    }
    if name.contains('/') {
        let path = Path::new(name);
        return is_executable_file(path).then_some(Cow::Borrowed(path));
    }
    search_path.resolve(name).map(Cow::Owned)
}

/// Whether `path` is a regular file the current process may execute.
pub fn is_executable_file(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}
