// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!   Command (builder)
//!        |  run() / read()
//!        v
//!   ,---------------------------------------,
//!   |  core::process                        |
//!   |  runner   resolve cwd, spawn, wait    |
//!   |  io       stdout/stderr multiplexing  |
//!   |  output   CommandOutput / settlement  |
//!   '---------------------------------------'
//!        |
//!        v
//!   Result<CommandOutput, CommandError>
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config    |
//!   |  utility      encoding, path            |
//!   +-----------------------------------------+
//! ```
//!
//! # Example
//!
//! ```no_run
//! use runcmd::Command;
//!
//! # #[tokio::main]
//! # async fn main() {
//! match Command::new("ls").flag("l").cwd("/tmp").run().await {
//!     Ok(output) => println!("{} lines", output.stdout().lines().count()),
//!     Err(err) => eprintln!("{err}: {}", err.output().stderr()),
//! }
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod utility;

pub use crate::core::process::{Command, CommandOutcome, CommandOutput, SPAWN_FAILURE_CODE};
pub use crate::error::CommandError;
