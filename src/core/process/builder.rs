// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command builder: the accumulated, not-yet-executed description of a run.
//!
//! ```text
//! Command::new("git")
//!  • arg/args              literal tokens, call order preserved
//!  • opt(k, v)             -k [v]
//!  • option(k, v)          --k [v]
//!  • cwd/cwd_join          fragments, resolved at execution
//!  • stdout/stderr_encoding, apply_settings
//!  • on_spawn/on_stdout/on_stderr/on_output   one slot each
//!  • run() (mirrors to terminal) / read() (silent)
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::observer::{Observers, SpawnInfo};
use crate::config::ProcessSettings;
use crate::utility::encoding::Encoding;
use crate::utility::path;

/// Optional value following an option key.
///
/// Empty strings count as "no value"; numbers are stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptValue(Option<String>);

impl OptValue {
    /// Returns the token to push after the key, if any.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<()> for OptValue {
    fn from((): ()) -> Self {
        Self(None)
    }
}

impl From<&str> for OptValue {
    fn from(value: &str) -> Self {
        Self((!value.is_empty()).then(|| value.to_string()))
    }
}

impl From<String> for OptValue {
    fn from(value: String) -> Self {
        Self((!value.is_empty()).then_some(value))
    }
}

impl From<&String> for OptValue {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl<T: Into<OptValue>> From<Option<T>> for OptValue {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::default, Into::into)
    }
}

macro_rules! impl_opt_value_number {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for OptValue {
                fn from(value: $ty) -> Self {
                    Self(Some(value.to_string()))
                }
            }
        )+
    };
}

impl_opt_value_number!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// Builder for configuring and running an external command.
///
/// Arguments are passed as a literal vector, never through a shell. A
/// `Command` is single-use: [`run`](Self::run) and [`read`](Self::read)
/// consume it.
///
/// # Example
///
/// ```no_run
/// use runcmd::Command;
///
/// # async fn demo() -> Result<(), runcmd::CommandError> {
/// let output = Command::new("git")
///     .arg("log")
///     .option("max-count", 3)
///     .opt("C", "")
///     .cwd("/srv/repo")
///     .on_stdout(|chunk| print!("{chunk}"))
///     .read()
///     .await?;
/// println!("{}", output.stdout());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Command {
    /// Executable name or path
    executable: String,
    /// Command-line arguments
    args: Vec<String>,
    /// Working directory base fragment
    cwd_base: Option<PathBuf>,
    /// Fragments resolved after the base, in order
    cwd_extra: Vec<PathBuf>,
    stdout_encoding: Encoding,
    stderr_encoding: Encoding,
    observers: Observers,
}

impl Command {
    /// Creates a new `Command` for the given executable.
    ///
    /// A bare name is looked up via `PATH` when the command runs.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            cwd_base: None,
            cwd_extra: Vec::new(),
            stdout_encoding: Encoding::default(),
            stderr_encoding: Encoding::default(),
            observers: Observers::default(),
        }
    }

    /// Adds an argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments to the command, in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds a short option: `-key`, followed by `value` if it has one.
    ///
    /// An empty `key` adds nothing but the value.
    #[must_use]
    pub fn opt(self, key: &str, value: impl Into<OptValue>) -> Self {
        self.push_option("-", key, value.into())
    }

    /// Adds a long option: `--key`, followed by `value` if it has one.
    #[must_use]
    pub fn option(self, key: &str, value: impl Into<OptValue>) -> Self {
        self.push_option("--", key, value.into())
    }

    /// Adds a short option without a value.
    #[must_use]
    pub fn flag(self, key: &str) -> Self {
        self.opt(key, ())
    }

    /// Adds a long option without a value.
    #[must_use]
    pub fn long_flag(self, key: &str) -> Self {
        self.option(key, ())
    }

    fn push_option(mut self, prefix: &str, key: &str, value: OptValue) -> Self {
        if !key.is_empty() {
            self.args.push(format!("{prefix}{key}"));
        }
        if let OptValue(Some(value)) = value {
            self.args.push(value);
        }
        self
    }

    /// Sets the working directory base fragment.
    ///
    /// Relative fragments are resolved against the current directory of this
    /// process when the command runs. Clears fragments added by
    /// [`cwd_join`](Self::cwd_join).
    #[must_use]
    pub fn cwd(mut self, base: impl AsRef<Path>) -> Self {
        self.cwd_base = Some(base.as_ref().to_path_buf());
        self.cwd_extra.clear();
        self
    }

    /// Appends a working directory fragment, resolved after the base.
    #[must_use]
    pub fn cwd_join(mut self, fragment: impl AsRef<Path>) -> Self {
        self.cwd_extra.push(fragment.as_ref().to_path_buf());
        self
    }

    /// Appends several working directory fragments.
    #[must_use]
    pub fn cwd_fragments<I, P>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.cwd_extra
            .extend(fragments.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Sets the encoding for stdout.
    #[must_use]
    pub const fn stdout_encoding(mut self, encoding: Encoding) -> Self {
        self.stdout_encoding = encoding;
        self
    }

    /// Sets the encoding for stderr.
    #[must_use]
    pub const fn stderr_encoding(mut self, encoding: Encoding) -> Self {
        self.stderr_encoding = encoding;
        self
    }

    /// Applies process defaults from loaded settings.
    #[must_use]
    pub const fn apply_settings(self, settings: &ProcessSettings) -> Self {
        self.stdout_encoding(settings.stdout_encoding)
            .stderr_encoding(settings.stderr_encoding)
    }

    /// Registers the observer called once the process has been created.
    ///
    /// Replaces any previously registered spawn observer.
    #[must_use]
    pub fn on_spawn(mut self, observer: impl FnMut(&SpawnInfo) + Send + 'static) -> Self {
        self.observers.set_spawn(Box::new(observer));
        self
    }

    /// Registers the observer for stdout chunks, replacing any previous one.
    #[must_use]
    pub fn on_stdout(mut self, observer: impl FnMut(&str) + Send + 'static) -> Self {
        self.observers.set_stdout(Box::new(observer));
        self
    }

    /// Registers the observer for stderr chunks, replacing any previous one.
    #[must_use]
    pub fn on_stderr(mut self, observer: impl FnMut(&str) + Send + 'static) -> Self {
        self.observers.set_stderr(Box::new(observer));
        self
    }

    /// Registers the observer for every chunk of either stream, replacing any previous one.
    #[must_use]
    pub fn on_output(mut self, observer: impl FnMut(&str) + Send + 'static) -> Self {
        self.observers.set_output(Box::new(observer));
        self
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Returns the argument vector built so far.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn cwd_base(&self) -> Option<&Path> {
        self.cwd_base.as_deref()
    }

    #[must_use]
    pub fn cwd_extra(&self) -> &[PathBuf] {
        &self.cwd_extra
    }

    /// Resolves the working directory against `anchor` without running anything.
    #[must_use]
    pub fn resolve_cwd(&self, anchor: impl AsRef<Path>) -> PathBuf {
        path::resolve(anchor, self.cwd_base.iter().chain(&self.cwd_extra))
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.executable.clone();
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    pub(super) fn into_parts(self) -> CommandParts {
        CommandParts {
            executable: self.executable,
            args: self.args,
            cwd_base: self.cwd_base,
            cwd_extra: self.cwd_extra,
            stdout_encoding: self.stdout_encoding,
            stderr_encoding: self.stderr_encoding,
            observers: self.observers,
        }
    }
}

/// Owned pieces of a `Command`, taken apart for execution.
pub(super) struct CommandParts {
    pub(super) executable: String,
    pub(super) args: Vec<String>,
    pub(super) cwd_base: Option<PathBuf>,
    pub(super) cwd_extra: Vec<PathBuf>,
    pub(super) stdout_encoding: Encoding,
    pub(super) stderr_encoding: Encoding,
    pub(super) observers: Observers,
}
