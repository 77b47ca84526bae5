// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! CommandError            (failure side of CommandOutcome)
//!   Exit   ran, nonzero code or killed by signal
//!   Spawn  could not be created, sentinel code
//!   both carry Box<CommandOutput> with captured stdout/stderr/output
//!
//! ConfigError             settings values and validation
//! Result<T>               anyhow, for setup paths (logging, config)
//! ```

use std::fmt::Write as _;

use thiserror::Error;

use crate::core::process::output::{CommandOutput, SPAWN_FAILURE_CODE, Signal};

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Failure outcome of a command execution.
///
/// Every variant keeps the full [`CommandOutput`], so captured output stays
/// available for diagnosis.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process ran and exited with a nonzero code or was killed by a signal.
    #[error("'{}' {}", .output.executable(), describe_exit(.code, .signal))]
    Exit {
        output: Box<CommandOutput>,
        code: Option<i32>,
        signal: Option<Signal>,
    },

    /// The process could not be created at all.
    #[error("failed to spawn '{}': {source}", .output.executable())]
    Spawn {
        output: Box<CommandOutput>,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>, signal: &Option<Signal>) -> String {
    let mut text = String::from("failed");
    if let Some(code) = code {
        let _ = write!(text, " with exit code {code}");
    }
    if let Some(signal) = signal {
        let _ = write!(text, ", terminated by {signal}");
    }
    text
}

impl CommandError {
    /// Returns the captured output of the failed execution.
    #[must_use]
    pub fn output(&self) -> &CommandOutput {
        match self {
            Self::Exit { output, .. } | Self::Spawn { output, .. } => output,
        }
    }

    /// Consumes the error and returns the captured output.
    #[must_use]
    pub fn into_output(self) -> CommandOutput {
        match self {
            Self::Exit { output, .. } | Self::Spawn { output, .. } => *output,
        }
    }

    /// Returns the exit code, or [`SPAWN_FAILURE_CODE`] if the process never started.
    ///
    /// A process that exits with `-1` (`0xFFFFFFFF` on Windows) reports the
    /// same value; check [`is_spawn_failure`](Self::is_spawn_failure) instead.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { code, .. } => *code,
            Self::Spawn { .. } => Some(SPAWN_FAILURE_CODE),
        }
    }

    /// Returns the terminating signal, if any.
    #[must_use]
    pub const fn signal(&self) -> Option<Signal> {
        match self {
            Self::Exit { signal, .. } => *signal,
            Self::Spawn { .. } => None,
        }
    }

    /// Returns true if the process could not be created.
    #[must_use]
    pub const fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Log level above the highest supported level.
    #[error("log level must be 0-5, got {level}")]
    LogLevelOutOfRange { level: u8 },
}

#[cfg(test)]
mod tests;
