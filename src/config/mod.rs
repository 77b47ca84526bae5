// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings for applications embedding runcmd.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. TOML files (or Settings::parse input), in the order added
//! 3. <PREFIX>_* env vars (if with_env_prefix)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! RUNCMD_LOG__CONSOLE_LEVEL=4          → log.console_level = 4
//! RUNCMD_PROCESS__STDOUT_ENCODING=acp  → process.stdout_encoding = "acp"
//! ```
//!
//! # Example
//!
//! ```toml
//! [log]
//! console_level = 3
//! log_file = "logs/runcmd.log"
//!
//! [process]
//! stdout_encoding = "utf8"
//! stderr_encoding = "oem"
//! ```

pub mod loader;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::logging::{LogConfig, LogLevel};
use crate::utility::encoding::Encoding;

use loader::ConfigLoader;

/// Complete settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Logging options.
    pub log: LogSettings,
    /// Defaults applied to commands via `Command::apply_settings`.
    pub process: ProcessSettings,
}

/// Logging options, converted to a [`LogConfig`] for `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub console_level: LogLevel,
    pub file_level: LogLevel,
    /// Level for events from other crates in the process.
    pub other_level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub show_timestamps: bool,
    pub show_target: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            console_level: LogLevel::INFO,
            file_level: LogLevel::TRACE,
            other_level: LogLevel::WARN,
            log_file: None,
            show_timestamps: true,
            show_target: false,
        }
    }
}

impl LogSettings {
    /// Builds the logging configuration described by these settings.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.console_level)
            .with_file_level(self.file_level)
            .with_other_level(self.other_level)
            .maybe_with_log_file(self.log_file.clone())
            .with_show_timestamps(self.show_timestamps)
            .with_show_target(self.show_target)
            .build()
    }
}

/// Per-stream decoding defaults for commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessSettings {
    pub stdout_encoding: Encoding,
    pub stderr_encoding: Encoding,
}

impl Settings {
    /// Create a new settings loader.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use runcmd::config::Settings;
    ///
    /// let settings = Settings::builder()
    ///     .add_toml_file_optional("runcmd.toml")
    ///     .with_env_prefix("RUNCMD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load settings from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Settings` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Settings` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty `log.log_file`.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if let Some(log_file) = &self.log.log_file
            && log_file.as_os_str().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                section: "log".to_string(),
                key: "log_file".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Format settings for display, one `key = value` line each.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "log.console_level",
            self.log.console_level.as_u8().to_string(),
        );
        options.insert("log.file_level", self.log.file_level.as_u8().to_string());
        options.insert(
            "log.log_file",
            self.log
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("log.other_level", self.log.other_level.as_u8().to_string());
        options.insert("log.show_timestamps", self.log.show_timestamps.to_string());
        options.insert("log.show_target", self.log.show_target.to_string());
        options.insert(
            "process.stdout_encoding",
            self.process.stdout_encoding.to_string(),
        );
        options.insert(
            "process.stderr_encoding",
            self.process.stderr_encoding.to_string(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
