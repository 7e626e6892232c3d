use crate::command::{CommandFactory, Segment};
use crate::env::Environment;
use crate::error::{ShellError, report_error};
use crate::external::ExternalCommand;
use crate::io_adapters::LineSource;
use crate::launcher::{Launcher, OsLauncher, ProcessHandle};
use crate::parser;
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the builtins defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The command interpreter: reads lines, runs their segments, waits for them.
///
/// Each instance owns its own [`Environment`], so several interpreters can
/// coexist in one process without sharing a search path.
///
/// Example
/// ```no_run
/// use std::io::Cursor;
/// use wish::Interpreter;
/// use wish::io_adapters::BatchSource;
///
/// let mut sh = Interpreter::default();
/// sh.run(&mut BatchSource::new(Cursor::new("echo hello & echo world\n")));
/// ```
pub struct Interpreter {
    env: Environment,
    builtins: Vec<Box<dyn CommandFactory>>,
    launcher: Box<dyn Launcher>,
    stderr: Box<dyn Write>,
}

impl Interpreter {
    /// Create an interpreter spawning through `launcher` and reporting errors to `stderr`.
    pub fn new(launcher: Box<dyn Launcher>, stderr: Box<dyn Write>) -> Self {
        use crate::builtin::*;
        Self {
            env: Environment::new(),
            builtins: vec![
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Path>::default()),
            ],
            launcher,
            stderr,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Whether `exit` has been run.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Read and execute lines until end of input or `exit`.
    pub fn run(&mut self, source: &mut dyn LineSource) {
        while !self.env.should_exit {
            match source.next_line() {
                Some(Ok(line)) => self.execute_line(&line),
                // The line is abandoned as a whole, nothing in it runs.
                Some(Err(err)) => self.report(&err),
                None => {
                    log::debug!("end of input");
                    break;
                }
            }
        }
    }

    /// Run every segment of `line`, then wait for all processes it spawned.
    ///
    /// If the line runs `exit`, the remaining segments are not dispatched and
    /// nothing is waited for.
    pub fn execute_line(&mut self, line: &str) {
        let handles = self.dispatch_line(line);
        if self.env.should_exit {
            log::debug!("exit requested, abandoning {} process(es)", handles.len());
            return;
        }
        Self::synchronize(handles);
    }

    fn dispatch_line(&mut self, line: &str) -> Vec<Box<dyn ProcessHandle>> {
        let mut handles = Vec::new();
        for text in parser::split_segments(line) {
            log::trace!("segment {text:?}");
            match self.dispatch_segment(text) {
                Ok(Some(handle)) => handles.push(handle),
                Ok(None) => {}
                Err(err) => self.report(&err),
            }
            if self.env.should_exit {
                break;
            }
        }
        handles
    }

    /// Parse one segment and run it. Returns the handle of a spawned process.
    fn dispatch_segment(&mut self, text: &str) -> Result<Option<Box<dyn ProcessHandle>>, ShellError> {
        let Some(segment) = parser::parse_segment(text)? else {
            return Ok(None);
        };
        if self.run_builtin(&segment)? {
            return Ok(None);
        }
        let command = ExternalCommand::resolve(&self.env.search_path, segment)?;
        self.launcher.launch(command).map(Some)
    }

    /// Returns whether the segment named a builtin, whatever its outcome.
    fn run_builtin(&mut self, segment: &Segment) -> Result<bool, ShellError> {
        let args: Vec<&str> = segment.args().iter().map(String::as_str).collect();
        for factory in &self.builtins {
            if let Some(cmd) = factory.try_create(segment.name(), &args) {
                log::debug!("builtin {}", segment.name());
                cmd.execute(&mut self.env)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn synchronize(handles: Vec<Box<dyn ProcessHandle>>) {
        for handle in handles {
            let pid = handle.id();
            if let Err(e) = handle.wait() {
                log::debug!("waiting for pid {pid} failed: {e}");
            }
        }
    }

    fn report(&mut self, err: &ShellError) {
        log::debug!("{err}");
        report_error(&mut self.stderr);
    }
}

impl Default for Interpreter {
    /// Create an interpreter that spawns real processes and reports to standard error.
    fn default() -> Self {
        Self::new(Box::new(OsLauncher), Box::new(std::io::stderr()))
    }
}
