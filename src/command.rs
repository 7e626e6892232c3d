use crate::env::Environment;
use crate::error::ShellError;

/// One parsed command of a line.
///
/// `argv` is never empty for a segment produced by the parser. `redirect`
/// names the file receiving both standard output and standard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub argv: Vec<String>,
    pub redirect: Option<String>,
}

impl Segment {
    /// The command name, `argv[0]`.
    pub fn name(&self) -> &str {
        &self.argv[0]
    }

    /// The arguments following the command name.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }
}

/// Object-safe trait for any command the interpreter runs in-process.
pub trait ExecutableCommand {
    /// Executes the command against the interpreter's state.
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<(), ShellError>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. A recognized
/// name with unusable arguments still yields a command, one that fails when
/// executed.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
