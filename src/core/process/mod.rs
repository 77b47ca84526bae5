// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning with streaming output capture.
//!
//! ```text
//! Command::new("cargo")
//!   .args() .opt() .option() .cwd() .on_stdout() ...
//!   .run() / .read()
//!       --> tokio::process::Command (no shell, no console window)
//!           multiplex stdout/stderr in one task
//!       --> Ok(CommandOutput { stdout, stderr, output, cwd, duration })
//!           Err(CommandError::Exit | CommandError::Spawn)
//! ```

pub mod builder;
mod io;
pub mod observer;
pub mod output;
mod runner;

pub use builder::{Command, OptValue};
pub use observer::{ChunkObserver, SpawnInfo, SpawnObserver};
pub use output::{CommandOutcome, CommandOutput, SPAWN_FAILURE_CODE, Signal};
