// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Optional `tracing` setup for applications embedding runcmd.
//!
//! The library only emits events; nothing is printed unless the host installs
//! a subscriber, either its own or the one built by [`init_logging`].
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!    |          |
//!    v          v
//! console      file (optional, appended)
//! stderr       non_blocking
//!    |          |
//!    '-- "<other>,runcmd=<level>" --'
//!        |
//!        v
//!    LogGuard (flush on drop)
//!
//! events:  warn   unreadable pipe, panicking observer, failed wait
//!          debug  cd / exec of every command
//!          trace  spawn, chunk, settlement
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ConfigError, Result};

/// Target prefix of every event emitted by this crate.
pub const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Verbosity, 0 (silent) to 5 (trace), as written in settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LogLevel(u8);

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);

    /// # Errors
    ///
    /// Returns `ConfigError::LogLevelOutOfRange` above 5.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        if level <= Self::TRACE.0 {
            Ok(Self(level))
        } else {
            Err(ConfigError::LogLevelOutOfRange { level })
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// `EnvFilter` level name.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Configuration for [`init_logging`].
///
/// `console_level` and `file_level` apply to runcmd's own events;
/// `other_level` applies to every other target in the process.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::INFO)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::TRACE)]
    file_level: LogLevel,
    #[builder(setters(name = with_other_level), default = LogLevel::WARN)]
    other_level: LogLevel,
    #[builder(setters(name = with_log_file), into)]
    log_file: Option<PathBuf>,
    #[builder(setters(name = with_show_timestamps), default = true)]
    show_timestamps: bool,
    #[builder(setters(name = with_show_target), default = false)]
    show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub const fn other_level(&self) -> LogLevel {
        self.other_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    #[must_use]
    pub const fn show_timestamps(&self) -> bool {
        self.show_timestamps
    }

    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.show_target
    }

    /// Filter directive: `other_level` everywhere, `level` for runcmd.
    #[must_use]
    pub fn directive(&self, level: LogLevel) -> String {
        format!(
            "{},{CRATE_TARGET}={}",
            self.other_level.as_directive(),
            level.as_directive()
        )
    }
}

/// Keeps the file writer alive; pending lines are flushed on drop.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs a global subscriber writing to stderr and, optionally, a file.
///
/// Console output goes to stderr so it never mixes with command output
/// mirrored to stdout by `Command::run`. The log file is appended to.
///
/// # Errors
///
/// Returns an error if the log file or its directory cannot be created, or if
/// a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use runcmd::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::DEBUG)
///     .with_log_file("logs/commands.log")
///     .build();
///
/// let _guard = init_logging(&config)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console_filter = EnvFilter::try_new(config.directive(config.console_level()))
        .context("invalid console filter")?;
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target());
    let console_layer = if config.show_timestamps() {
        console_layer.with_filter(console_filter).boxed()
    } else {
        console_layer
            .without_time()
            .with_filter(console_filter)
            .boxed()
    };

    let (file_layer, file_guard) = match config.log_file() {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_filter = EnvFilter::try_new(config.directive(config.file_level()))
                .context("invalid file filter")?;
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}
