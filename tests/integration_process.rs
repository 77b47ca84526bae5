// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for command execution.
//!
//! Exercises the public `Command` API end to end against real executables.
//! Builder and observer unit tests are in `src/core/process/tests.rs`.

#![cfg(unix)]

use std::sync::{Arc, Mutex};

use runcmd::{Command, CommandError, SPAWN_FAILURE_CODE};

// =============================================================================
// Success and failure outcomes
// =============================================================================

#[tokio::test]
async fn echo_read_captures_stdout() {
    let output = Command::new("echo")
        .arg("hello")
        .read()
        .await
        .expect("echo should succeed");

    assert_eq!(output.stdout(), "hello");
    assert_eq!(output.output(), "hello");
    assert_eq!(output.stderr(), "");
}

#[tokio::test]
async fn listing_with_short_flag_runs_noisily() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), b"x").unwrap();

    let cmd = Command::new("ls").opt("l", ()).cwd(dir.path());
    assert_eq!(cmd.arguments(), ["-l"]);

    let chunks = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&chunks);
    let output = cmd
        .on_stdout(move |chunk| sink.lock().unwrap().push_str(chunk))
        .run()
        .await
        .expect("ls -l should succeed");

    assert!(output.stdout().contains("marker.txt"));
    assert_eq!(chunks.lock().unwrap().trim_end(), output.stdout());
}

#[tokio::test]
async fn nonzero_exit_is_failure() {
    let err = Command::new("false")
        .read()
        .await
        .expect_err("false should fail");

    match &err {
        CommandError::Exit { code, signal, .. } => {
            assert_eq!(*code, Some(1));
            assert_eq!(*signal, None);
        }
        CommandError::Spawn { .. } => panic!("expected an exit failure, got {err}"),
    }
    assert_eq!(err.output().stdout(), "");
    assert_eq!(err.output().stderr(), "");
}

#[tokio::test]
async fn missing_executable_is_spawn_failure() {
    let err = Command::new("definitely-not-a-real-binary-7f3a")
        .arg("--help")
        .read()
        .await
        .expect_err("missing executable should fail");

    assert!(err.is_spawn_failure());
    assert_eq!(err.exit_code(), Some(SPAWN_FAILURE_CODE));
    let stderr = err.output().stderr();
    assert!(stderr.contains("NotFound"), "{stderr}");
    assert!(stderr.contains("os error 2"), "{stderr}");
    assert_eq!(err.output().args(), ["--help"]);
}

#[tokio::test]
async fn missing_working_directory_is_spawn_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = Command::new("true")
        .cwd(dir.path())
        .cwd_join("missing")
        .read()
        .await
        .expect_err("missing cwd should fail");

    assert!(err.is_spawn_failure());
    assert_eq!(err.output().cwd(), dir.path().join("missing"));
}

// =============================================================================
// Working directory
// =============================================================================

#[tokio::test]
async fn absolute_cwd_is_reported_by_child() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().canonicalize().unwrap();

    let output = Command::new("pwd")
        .opt("P", ())
        .cwd(&cwd)
        .read()
        .await
        .expect("pwd should succeed");

    assert_eq!(output.stdout(), cwd.to_str().unwrap());
    assert_eq!(output.cwd(), cwd);
}

#[tokio::test]
async fn cwd_fragments_resolve_sequentially() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    std::fs::create_dir_all(root.join("a/b")).unwrap();

    let output = Command::new("pwd")
        .flag("P")
        .cwd("/")
        .cwd_join(&root)
        .cwd_fragments(["a", "./b/../b"])
        .read()
        .await
        .expect("pwd should succeed");

    assert_eq!(output.cwd(), root.join("a/b"));
    assert_eq!(output.stdout(), root.join("a/b").to_str().unwrap());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn independent_commands_run_concurrently() {
    let slow = Command::new("sh").args(["-c", "sleep 0.3; echo slow"]);
    let fast = Command::new("sh").args(["-c", "echo fast"]);

    let started = std::time::Instant::now();
    let (slow, fast) = tokio::join!(slow.read(), fast.read());

    assert_eq!(slow.unwrap().stdout(), "slow");
    assert_eq!(fast.unwrap().stdout(), "fast");
    assert!(started.elapsed() < std::time::Duration::from_secs(3));
}

#[tokio::test]
async fn spawned_tasks_are_send() {
    let handle = tokio::spawn(
        Command::new("echo")
            .arg("from task")
            .on_output(|_| {})
            .read(),
    );
    let output = handle.await.unwrap().unwrap();
    assert_eq!(output.stdout(), "from task");
}
