//! Error taxonomy of the interpreter.
//!
//! Internally every failure keeps its cause so it can be logged, but the user
//! only ever sees [`ERROR_MESSAGE`]. Callers must not try to tell failures apart
//! by what ends up on the error stream.

use crate::parser::ParsingError;
use std::io::{self, Write};
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The one and only diagnostic the shell prints.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Reasons a segment (or the whole invocation) can fail.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The segment text violates the line grammar.
    #[error("syntax error: {0}")]
    Syntax(#[from] ParsingError),

    /// A built-in was called with the wrong number of arguments.
    #[error("{builtin}: invalid arguments")]
    Usage { builtin: &'static str },

    /// `cd` could not switch to the requested directory.
    #[error("cd: cannot change directory to {path}: {source}")]
    ChangeDir {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An input line is not valid UTF-8.
    #[error("undecodable input line: {0}")]
    Undecodable(#[from] FromUtf8Error),

    /// The command name did not resolve to an executable file.
    #[error("{0}: command not found")]
    NotFound(String),

    /// The redirection target cannot be handed to the operating system.
    #[error("invalid redirection target {0:?}")]
    InvalidTarget(String),

    /// The operating system refused to start the program.
    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write [`ERROR_MESSAGE`] to `stream` and flush it.
///
/// Failures to write are ignored: there is nowhere left to report them.
pub fn report_error(stream: &mut dyn Write) {
    let _ = stream.write_all(ERROR_MESSAGE.as_bytes());
    let _ = stream.flush();
}
