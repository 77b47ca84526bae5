// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::time::Duration;

use super::{CommandError, ConfigError};
use crate::core::process::output::{CommandOutput, SPAWN_FAILURE_CODE, Signal};

fn sample_output() -> Box<CommandOutput> {
    Box::new(CommandOutput::new(
        "make".to_string(),
        vec!["-j4".to_string()],
        PathBuf::from("/src"),
        Duration::from_millis(12),
        String::new(),
        "boom".to_string(),
        "boom".to_string(),
    ))
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "log".to_string(),
        key: "log_file".to_string(),
        message: "must not be empty".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'log_file' in section '[log]': must not be empty");
}

#[test]
fn test_exit_error_display() {
    let by_code = CommandError::Exit {
        output: sample_output(),
        code: Some(2),
        signal: None,
    };
    let by_signal = CommandError::Exit {
        output: sample_output(),
        code: None,
        signal: Some(Signal::new(15)),
    };
    insta::assert_snapshot!(by_code.to_string(), @"'make' failed with exit code 2");
    insta::assert_snapshot!(by_signal.to_string(), @"'make' failed, terminated by SIGTERM");
}

#[test]
fn test_spawn_error_accessors() {
    let err = CommandError::Spawn {
        output: sample_output(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    assert!(err.is_spawn_failure());
    assert_eq!(err.exit_code(), Some(SPAWN_FAILURE_CODE));
    assert_eq!(err.signal(), None);
    assert_eq!(err.output().stderr(), "boom");
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(err.into_output().args(), ["-j4"]);
}

#[test]
fn test_exit_with_sentinel_code_is_not_spawn_failure() {
    let err = CommandError::Exit {
        output: sample_output(),
        code: Some(-1),
        signal: None,
    };
    assert_eq!(err.exit_code(), Some(SPAWN_FAILURE_CODE));
    assert!(!err.is_spawn_failure());
    insta::assert_snapshot!(err.to_string(), @"'make' failed with exit code -1");
}

#[test]
fn test_log_level_error_display() {
    let err = ConfigError::LogLevelOutOfRange { level: 9 };
    insta::assert_snapshot!(err.to_string(), @"log level must be 0-5, got 9");
}
