use crate::command::{CommandFactory, ExecutableCommand};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use std::env;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run directly in the interpreter without spawning a child process.
/// Argument validation happens in [`from_args`](BuiltinCommand::from_args), so a
/// misused builtin never touches the environment.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "exit" or "cd". Matched exactly.
    fn name() -> &'static str;

    /// Build the command from the arguments following its name.
    fn from_args(args: &[&str]) -> Result<Self, ShellError>;

    /// Executes the command against the interpreter's environment.
    fn execute(self, env: &mut Environment) -> Result<(), ShellError>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<(), ShellError> {
        T::execute(*self, env)
    }
}

/// A recognized builtin whose arguments were rejected.
struct InvalidArgs {
    error: ShellError,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, _env: &mut Environment) -> Result<(), ShellError> {
        Err(self.error)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(args) {
                Ok(cmd) => Box::new(cmd),
                Err(error) => Box::new(InvalidArgs { error }),
            })
        } else {
            None
        }
    }
}

/// Leave the shell. Takes no arguments.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn from_args(args: &[&str]) -> Result<Self, ShellError> {
        if args.is_empty() {
            Ok(Exit)
        } else {
            Err(ShellError::Usage {
                builtin: Self::name(),
            })
        }
    }

    fn execute(self, env: &mut Environment) -> Result<(), ShellError> {
        env.should_exit = true;
        Ok(())
    }
}

/// Change the working directory of the shell process.
pub struct Cd {
    /// directory to switch to; absolute or relative to the current directory.
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn from_args(args: &[&str]) -> Result<Self, ShellError> {
        match args {
            [target] => Ok(Cd {
                target: target.to_string(),
            }),
            _ => Err(ShellError::Usage {
                builtin: Self::name(),
            }),
        }
    }

    fn execute(self, _env: &mut Environment) -> Result<(), ShellError> {
        env::set_current_dir(&self.target).map_err(|source| ShellError::ChangeDir {
            path: self.target,
            source,
        })
    }
}

/// Replace the search path with the given directories, in order.
///
/// With no arguments the search path becomes empty and only commands given by
/// an explicit path can run.
pub struct Path {
    pub dirs: Vec<String>,
}

impl BuiltinCommand for Path {
    fn name() -> &'static str {
        "path"
    }

    fn from_args(args: &[&str]) -> Result<Self, ShellError> {
        Ok(Path {
            dirs: args.iter().map(|dir| dir.to_string()).collect(),
        })
    }

    fn execute(self, env: &mut Environment) -> Result<(), ShellError> {
        log::debug!("search path set to {:?}", self.dirs);
        env.search_path.replace(self.dirs);
        Ok(())
    }
}
