use crate::search_path::SearchPath;

/// Mutable state owned by one interpreter instance.
///
/// The environment contains:
/// - `search_path`: the directories searched for commands given by bare name.
/// - `should_exit`: set by the `exit` built-in; the main loop stops reading
///   input once it is raised.
///
/// The working directory is not mirrored here: `cd` changes the process's own
/// working directory, which spawned commands inherit.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub search_path: SearchPath,
    pub should_exit: bool,
}

impl Environment {
    /// A fresh environment with the default search path.
    pub fn new() -> Self {
        Self::default()
    }
}
