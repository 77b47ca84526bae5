// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for settings loading.
//!
//! Tests layered TOML files and applying settings to commands.

use runcmd::config::Settings;
use runcmd::config::loader::SettingsSource;
use runcmd::logging::LogLevel;
use runcmd::utility::encoding::Encoding;

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn later_files_override_earlier_ones() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    std::fs::write(
        &base,
        "[log]\nconsole_level = 2\nshow_target = true\n\n[process]\nstdout_encoding = \"oem\"\n",
    )
    .unwrap();
    std::fs::write(&local, "[log]\nconsole_level = 5\n").unwrap();

    let loader = Settings::builder()
        .add_toml_file(&base)
        .add_toml_file_optional(&local)
        .add_toml_file_optional(dir.path().join("absent.toml"));
    assert_eq!(
        loader.sources(),
        [
            SettingsSource::File(base.clone()),
            SettingsSource::OptionalFile(local.clone()),
        ]
    );
    assert!(loader.describe_sources()[1].starts_with("2. [optional] "));

    let settings = loader.build().unwrap();
    assert_eq!(settings.log.console_level, LogLevel::TRACE);
    assert!(settings.log.show_target);
    assert_eq!(settings.process.stdout_encoding, Encoding::Oem);
    assert_eq!(settings.process.stderr_encoding, Encoding::Utf8);
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[log\nconsole_level = ").unwrap();

    assert!(Settings::from_file(&path).is_err());
}

#[test]
fn unknown_encoding_is_an_error() {
    assert!(Settings::parse("[process]\nstdout_encoding = \"latin9\"\n").is_err());
}

// =============================================================================
// Applying settings
// =============================================================================

#[cfg(unix)]
#[tokio::test]
async fn process_settings_drive_decoding() {
    let settings = Settings::parse("[process]\nstdout_encoding = \"acp\"\n").unwrap();

    let output = runcmd::Command::new("printf")
        .arg("na\\357ve")
        .apply_settings(&settings.process)
        .read()
        .await
        .expect("printf should succeed");

    assert_eq!(output.stdout(), "naïve");
}
