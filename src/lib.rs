//! A minimal command interpreter.
//!
//! `wish` reads command lines from an interactive terminal or a batch script,
//! splits each line into `&`-separated segments and runs every segment either
//! as a built-in (`exit`, `cd`, `path`) or as a child process found through the
//! search path. All segments of one line run concurrently; the interpreter
//! waits for every one of them before reading the next line.
//!
//! The main entry point is [`Interpreter`]. Input comes from any
//! [`LineSource`](io_adapters::LineSource), and processes are started through a
//! [`Launcher`](launcher::Launcher), so both ends can be replaced in tests.
//!
//! Every failure is reported the same way: [`ERROR_MESSAGE`] is written to the
//! error stream. The underlying cause is only visible through the `log` facade.

mod builtin;
pub mod command;
pub mod env;
pub mod error;
pub mod external;
mod interpreter;
pub mod io_adapters;
pub mod launcher;
pub mod lexer;
pub mod parser;
pub mod search_path;

#[cfg(test)]
mod test_utils;

/// Just a convenient re-export of the command interpreter.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::Interpreter;

pub use error::{ERROR_MESSAGE, ShellError, report_error};
