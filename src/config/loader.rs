// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered settings loading.
//!
//! ```text
//! Settings::builder()
//!   .add_toml_file(path)            required, error if missing
//!   .add_toml_file_optional(path)   skipped if missing
//!   .with_env_prefix("RUNCMD")      RUNCMD_<SECTION>__<KEY>, applied last
//!        |
//!        v
//!    build() --> Settings (validated)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

use super::Settings;
use crate::error::Result;

/// One layer that contributed to the loaded settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    File(PathBuf),
    OptionalFile(PathBuf),
    Inline,
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::OptionalFile(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[inline]"),
        }
    }
}

/// Collects settings layers; later layers override earlier ones.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<SettingsSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.sources.push(SettingsSource::File(path.to_path_buf()));
        self
    }

    /// Adds a TOML file that is skipped if it does not exist.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.exists() {
            self.sources
                .push(SettingsSource::OptionalFile(path.to_path_buf()));
        }
        self
    }

    pub(crate) fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(SettingsSource::Inline);
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables, e.g.
    /// `RUNCMD_PROCESS__STDOUT_ENCODING=oem`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Layers that will be read, in override order. Missing optional files
    /// are left out.
    #[must_use]
    pub fn sources(&self) -> &[SettingsSource] {
        &self.sources
    }

    /// Numbered description of [`sources`](Self::sources), one line each.
    #[must_use]
    pub fn describe_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .zip(1..)
            .map(|(source, n)| format!("{n}. {source}"))
            .collect()
    }

    /// Merges all layers and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file is not valid
    /// TOML, a value has the wrong type or an unknown key, or validation fails.
    pub fn build(self) -> Result<Settings> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let settings: Settings = builder
            .build()
            .context("failed to load settings")?
            .try_deserialize()
            .context("failed to deserialize settings")?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
