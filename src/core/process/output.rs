// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Result projection: accumulated state --> `CommandOutcome`.
//!
//! ```text
//! ExecutionState + Settlement
//!   Exited(code 0)        --> Ok(CommandOutput)
//!   Exited(code != 0|sig) --> Err(CommandError::Exit)
//!   WaitFailed            --> Err(CommandError::Exit { code: None })
//!   SpawnFailed(io)       --> Err(CommandError::Spawn), sentinel code,
//!                             diagnostic line appended to stderr
//! buffers trimmed (trailing whitespace) exactly once, here
//! ```

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

use tracing::trace;

use super::io::ExecutionState;
use crate::error::CommandError;

/// Exit code reported when the process could not be created.
///
/// On Windows a process can really exit with `0xFFFFFFFF`, which reads as
/// `-1` too. Use [`CommandError::is_spawn_failure`] to tell spawn failures
/// apart; the code alone is only unambiguous on Unix.
pub const SPAWN_FAILURE_CODE: i32 = -1;

/// Result of one command execution.
pub type CommandOutcome = Result<CommandOutput, CommandError>;

/// Signal that terminated a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal(i32);

impl Signal {
    #[must_use]
    pub const fn new(number: i32) -> Self {
        Self(number)
    }

    /// Returns the raw signal number.
    #[must_use]
    pub const fn number(self) -> i32 {
        self.0
    }

    /// Returns the conventional name for common POSIX signals.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            1 => "SIGHUP",
            2 => "SIGINT",
            3 => "SIGQUIT",
            4 => "SIGILL",
            6 => "SIGABRT",
            8 => "SIGFPE",
            9 => "SIGKILL",
            11 => "SIGSEGV",
            13 => "SIGPIPE",
            14 => "SIGALRM",
            15 => "SIGTERM",
            _ => return None,
        })
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "signal {}", self.0),
        }
    }
}

/// Captured result of a command: what ran, where, for how long, and what it printed.
///
/// `stdout`, `stderr` and `output` (both interleaved in arrival order) have
/// trailing whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    executable: String,
    args: Vec<String>,
    cwd: PathBuf,
    duration: Duration,
    stdout: String,
    stderr: String,
    output: String,
}

impl CommandOutput {
    pub(crate) const fn new(
        executable: String,
        args: Vec<String>,
        cwd: PathBuf,
        duration: Duration,
        stdout: String,
        stderr: String,
        output: String,
    ) -> Self {
        Self {
            executable,
            args,
            cwd,
            duration,
            stdout,
            stderr,
            output,
        }
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the resolved absolute working directory.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the duration in whole milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Returns stdout and stderr interleaved in arrival order.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }
}

/// How an execution ended.
#[derive(Debug)]
pub(super) enum Settlement {
    Exited(ExitStatus),
    WaitFailed,
    SpawnFailed(std::io::Error),
}

fn status_parts(status: ExitStatus) -> (Option<i32>, Option<Signal>) {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        (status.code(), status.signal().map(Signal::new))
    }
    #[cfg(not(unix))]
    {
        (status.code(), None)
    }
}

fn trim_owned(mut text: String) -> String {
    text.truncate(text.trim_end().len());
    text
}

impl ExecutionState {
    /// Records the settlement and builds the final outcome.
    pub(super) fn settle(
        mut self,
        executable: String,
        args: Vec<String>,
        settlement: Settlement,
    ) -> CommandOutcome {
        let spawn_error = match settlement {
            Settlement::Exited(status) => {
                let (code, signal) = status_parts(status);
                self.exit_code = code;
                self.signal = signal;
                None
            }
            Settlement::WaitFailed => None,
            Settlement::SpawnFailed(err) => {
                self.exit_code = Some(SPAWN_FAILURE_CODE);
                if !self.stderr.is_empty() && !self.stderr.ends_with('\n') {
                    self.stderr.push('\n');
                }
                let _ = write!(self.stderr, "{:?}: {err}", err.kind());
                Some(err)
            }
        };

        let duration = self.started.elapsed();
        let exit_code = self.exit_code;
        let signal = self.signal;
        let output = Box::new(CommandOutput::new(
            executable,
            args,
            self.cwd,
            duration,
            trim_owned(self.stdout),
            trim_owned(self.stderr),
            trim_owned(self.output),
        ));

        trace!(
            executable = %output.executable(),
            exit_code = ?exit_code,
            signal = ?signal,
            duration_ms = output.duration_ms(),
            "settled"
        );

        match (spawn_error, exit_code) {
            (Some(source), _) => Err(CommandError::Spawn { output, source }),
            (None, Some(0)) => Ok(*output),
            (None, code) => Err(CommandError::Exit {
                output,
                code,
                signal,
            }),
        }
    }
}
