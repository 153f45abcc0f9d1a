//! Git command runner
//!
//! Runs the invocations planned by the dispatcher against the `git` binary.
//! Output is inherited so git talks to the terminal directly; only the exit
//! status comes back.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use thiserror::Error;

use crate::core::dispatch::GitInvocation;
use crate::util::cmd::{display_cmd, log_cmd};
use crate::util::signal::ChildActivity;

/// Errors that can occur when running git
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git needs to be installed to use G (no '{0}' on PATH)")]
    NotInstalled(String),

    #[error("Working directory {0} does not exist")]
    MissingDir(PathBuf),

    #[error("`{command}` failed ({status})")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Executes git invocations, one at a time
pub trait CommandRunner {
    /// Run `invocation` and wait for it to exit
    fn run(&mut self, invocation: &GitInvocation) -> Result<(), GitError>;

    /// Whether the underlying tool can be found at all
    fn is_available(&self) -> bool {
        true
    }
}

/// Runs invocations through the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    activity: ChildActivity,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a different executable (a wrapper script, an absolute path, ...)
    pub fn with_program(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            activity: ChildActivity::new(),
        }
    }

    /// Flag raised while a git child runs
    pub fn activity(&self) -> &ChildActivity {
        &self.activity
    }

    /// Resolve the executable on `PATH`
    pub fn locate(&self) -> Result<PathBuf, GitError> {
        which::which(&self.program).map_err(|_| self.not_installed())
    }

    fn not_installed(&self) -> GitError {
        GitError::NotInstalled(self.program.to_string_lossy().into_owned())
    }

    fn command(&self, invocation: &GitInvocation) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(invocation.subcommand.as_str()).args(&invocation.args);
        if let Some(ref dir) = invocation.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl CommandRunner for GitCli {
    fn run(&mut self, invocation: &GitInvocation) -> Result<(), GitError> {
        // A missing current_dir also surfaces as NotFound from the spawn.
        if let Some(ref dir) = invocation.cwd {
            if !dir.is_dir() {
                return Err(GitError::MissingDir(dir.clone()));
            }
        }

        let mut cmd = self.command(invocation);
        log_cmd(&cmd);

        let status = {
            let _running = self.activity.enter();
            cmd.status()
        }
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => self.not_installed(),
            _ => GitError::Io(e),
        })?;

        if !status.success() {
            return Err(GitError::CommandFailed {
                command: display_cmd(&cmd),
                status,
            });
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.locate().is_ok()
    }
}
