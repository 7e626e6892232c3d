//! Starting external commands as child processes.
//!
//! [`Launcher`] is the seam between the main loop and the operating system.
//! [`OsLauncher`] spawns real processes; tests substitute a recorder.

use crate::error::{ERROR_MESSAGE, ShellError};
use crate::external::ExternalCommand;
use std::ffi::CString;
use std::io;
use std::os::unix::process::CommandExt;
use std::process::Child;

/// A running child the main loop waits for at the end of the line.
pub trait ProcessHandle {
    /// Operating system identifier of the process.
    fn id(&self) -> u32;

    /// Block until the process terminates. The exit status is not inspected.
    fn wait(self: Box<Self>) -> io::Result<()>;
}

/// Capability to start an external command without waiting for it.
pub trait Launcher {
    fn launch(&mut self, command: ExternalCommand) -> Result<Box<dyn ProcessHandle>, ShellError>;
}

/// Spawns commands with [`std::process::Command`].
///
/// The redirection target is opened in the child, after the fork, so a bad
/// target only ever kills that child: it writes [`ERROR_MESSAGE`] to its own
/// standard error and exits with status 1.
///
/// A failed exec is different: [`std::process::Command::spawn`] reports it
/// back to the parent, so the message goes to the interpreter's error stream
/// rather than into the redirection target.
#[derive(Debug, Default)]
pub struct OsLauncher;

impl Launcher for OsLauncher {
    fn launch(&mut self, command: ExternalCommand) -> Result<Box<dyn ProcessHandle>, ShellError> {
        let mut process = std::process::Command::new(&command.program);
        if let Some((name, args)) = command.argv.split_first() {
            process.arg0(name).args(args);
        }

        if let Some(target) = &command.redirect {
            let target = CString::new(target.as_str())
                .map_err(|_| ShellError::InvalidTarget(target.clone()))?;
            // SAFETY: the hook only calls async-signal-safe functions and
            // does not allocate.
            unsafe {
                process.pre_exec(move || {
                    redirect_output(&target);
                    Ok(())
                });
            }
        }

        let child = process.spawn().map_err(|source| ShellError::Spawn {
            program: command.program.clone(),
            source,
        })?;
        log::debug!(
            "spawned {} as pid {}",
            command.program.display(),
            child.id()
        );
        Ok(Box::new(ChildHandle(child)))
    }
}

/// Point the child's standard output and standard error at `target`.
///
/// Runs between fork and exec. Never returns on failure.
fn redirect_output(target: &CString) {
    // SAFETY: plain system calls on a valid NUL-terminated path and on file
    // descriptors owned by this (child) process.
    unsafe {
        let fd = libc::open(
            target.as_ptr(),
            libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
            0o666 as libc::c_uint,
        );
        if fd < 0 {
            abort_child();
        }
        if libc::dup2(fd, libc::STDOUT_FILENO) < 0 || libc::dup2(fd, libc::STDERR_FILENO) < 0 {
            abort_child();
        }
        // With fd 1 or 2 closed in the parent, open may hand back one of them.
        if fd > libc::STDERR_FILENO {
            libc::close(fd);
        }
    }
}

fn abort_child() -> ! {
    // SAFETY: write(2) and _exit(2) are async-signal-safe.
    unsafe {
        libc::write(
            libc::STDERR_FILENO,
            ERROR_MESSAGE.as_ptr().cast(),
            ERROR_MESSAGE.len(),
        );
        libc::_exit(1)
    }
}

struct ChildHandle(Child);

impl ProcessHandle for ChildHandle {
    fn id(&self) -> u32 {
        self.0.id()
    }

    fn wait(mut self: Box<Self>) -> io::Result<()> {
        // Child::wait already retries on EINTR.
        let status = self.0.wait()?;
        log::trace!("pid {} finished with {}", self.0.id(), status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sh(script: &str, redirect: Option<String>) -> ExternalCommand {
        ExternalCommand {
            program: PathBuf::from("/bin/sh"),
            argv: vec!["sh".to_string(), "-c".to_string(), script.to_string()],
            redirect,
        }
    }

    fn run(command: ExternalCommand) {
        let handle = OsLauncher.launch(command).expect("spawn");
        assert!(handle.id() > 0);
        handle.wait().expect("wait");
    }

    #[test]
    fn redirect_captures_both_streams() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        run(sh(
            "echo to-stdout; echo to-stderr 1>&2",
            Some(out.to_string_lossy().into_owned()),
        ));
        assert_eq!(fs::read_to_string(&out).unwrap(), "to-stdout\nto-stderr\n");
    }

    #[test]
    fn redirect_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        fs::write(&out, "a much longer line of stale content\n").unwrap();

        let target = out.to_string_lossy().into_owned();
        run(sh("echo first", Some(target.clone())));
        assert_eq!(fs::read_to_string(&out).unwrap(), "first\n");
        run(sh("echo second", Some(target)));
        assert_eq!(fs::read_to_string(&out).unwrap(), "second\n");
    }

    #[test]
    fn bad_target_only_fails_the_child() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("missing-dir").join("out.txt");
        let handle = OsLauncher
            .launch(sh("echo never", Some(out.to_string_lossy().into_owned())))
            .expect("the parent still spawns the child");
        handle.wait().expect("wait");
        assert!(!out.exists());
    }

    #[test]
    fn redirect_keeps_target_when_it_lands_on_stdout() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let target = CString::new(out.to_string_lossy().into_owned()).unwrap();

        let mut process = std::process::Command::new("/bin/sh");
        process.args(["-c", "echo to-stdout; echo to-stderr 1>&2"]);
        // SAFETY: only close(2), open(2) and dup2(2) run in the child.
        unsafe {
            process.pre_exec(move || {
                // open() now returns 1, the lowest free descriptor.
                libc::close(libc::STDOUT_FILENO);
                libc::close(libc::STDERR_FILENO);
                redirect_output(&target);
                Ok(())
            });
        }
        process.status().expect("spawn");

        assert_eq!(fs::read_to_string(&out).unwrap(), "to-stdout\nto-stderr\n");
    }

    #[test]
    fn argv0_is_the_typed_name() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("argv0.txt");
        run(ExternalCommand {
            program: PathBuf::from("/bin/sh"),
            argv: vec![
                "custom-name".to_string(),
                "-c".to_string(),
                "echo $0".to_string(),
            ],
            redirect: Some(out.to_string_lossy().into_owned()),
        });
        assert_eq!(fs::read_to_string(&out).unwrap(), "custom-name\n");
    }

    #[test]
    fn nul_in_target_is_rejected_before_spawning() {
        let err = OsLauncher
            .launch(sh("true", Some("bad\0name".to_string())))
            .err()
            .expect("must fail");
        assert!(matches!(err, ShellError::InvalidTarget(_)));
    }
}
