//! Adapters between the interpreter and the outside world's streams.

use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::cell::RefCell;
use std::io::{BufRead, Result as IoResult, Write};
use std::rc::Rc;

/// Prompt shown before each line in interactive mode.
pub const PROMPT: &str = "wish> ";

/// Supplies the interpreter with input, one line per call.
pub trait LineSource {
    /// The next line, or `None` at end of input.
    ///
    /// A line that was read but cannot be used comes back as `Some(Err(..))`;
    /// reading continues with the line after it.
    fn next_line(&mut self) -> Option<Result<String, ShellError>>;
}

/// Reads a script without prompting.
pub struct BatchSource<R> {
    reader: R,
}

impl<R: BufRead> BatchSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BatchSource<R> {
    fn next_line(&mut self) -> Option<Result<String, ShellError>> {
        let mut bytes = Vec::new();
        match self.reader.read_until(b'\n', &mut bytes) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8(bytes).map_err(ShellError::from)),
            Err(e) => {
                log::debug!("batch input failed: {e}");
                None
            }
        }
    }
}

/// Reads from the terminal with line editing and history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self) -> Option<Result<String, ShellError>> {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        log::debug!("history not updated: {e}");
                    }
                }
                Some(Ok(line))
            }
            // Ctrl-C drops the line being typed.
            Err(ReadlineError::Interrupted) => Some(Ok(String::new())),
            Err(ReadlineError::Eof) => None,
            Err(err) => {
                log::debug!("terminal input failed: {err}");
                None
            }
        }
    }
}

/// Memory-backed writer for capturing the interpreter's error stream.
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    /// Public constructor.
    pub fn new() -> Self {
        Self {
            buf: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Convenience: create writer and return (writer, rc_handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = mw.buf.clone();
        (mw, rc)
    }
}

impl Default for MemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn line(source: &mut dyn LineSource) -> Option<String> {
        source.next_line().map(|line| line.expect("decodable line"))
    }

    #[test]
    fn batch_source_yields_lines_then_none() {
        let mut source = BatchSource::new(Cursor::new("ls\n\ncd /tmp\nexit"));
        assert_eq!(line(&mut source).as_deref(), Some("ls\n"));
        assert_eq!(line(&mut source).as_deref(), Some("\n"));
        assert_eq!(line(&mut source).as_deref(), Some("cd /tmp\n"));
        assert_eq!(line(&mut source).as_deref(), Some("exit"));
        assert_eq!(line(&mut source), None);
        assert_eq!(line(&mut source), None);
    }

    #[test]
    fn batch_source_keeps_reading_after_invalid_utf8() {
        let mut source = BatchSource::new(Cursor::new(b"ls\n\xff\xfe bad\nexit\n".to_vec()));
        assert_eq!(line(&mut source).as_deref(), Some("ls\n"));
        assert!(matches!(
            source.next_line(),
            Some(Err(ShellError::Undecodable(_)))
        ));
        assert_eq!(line(&mut source).as_deref(), Some("exit\n"));
        assert_eq!(line(&mut source), None);
    }

    #[test]
    fn mem_writer_shares_its_buffer() {
        let (mut writer, handle) = MemWriter::with_handle();
        write!(writer, "abc").unwrap();
        writer.flush().unwrap();
        assert_eq!(handle.borrow().as_slice(), b"abc");
    }
}
