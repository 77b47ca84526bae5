// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle.
//!
//! ```text
//! run() / read()
//!        |
//!        v
//!   resolve cwd (once)  current_dir + base + extra...
//!        |
//!        v
//!     spawn()  ---- Err ----> Settlement::SpawnFailed
//!        |
//!   on_spawn(SpawnInfo)
//!        |
//!        v
//!   stream_output()   stdout/stderr --> buffers, observers, mirror
//!        |
//!        v
//!     wait()   ---> Settlement::Exited(status)
//!        |
//!        v
//!   ExecutionState::settle() --> CommandOutcome
//! ```

use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command as ProcessCommand;
use tracing::{debug, trace, warn};

use super::builder::Command;
use super::io::{Echo, ExecutionState, Mirror, stream_output};
use super::observer::SpawnInfo;
use super::output::{CommandOutcome, Settlement};
use crate::utility::path;

impl Command {
    /// Runs the command, mirroring its output to this process's stdout/stderr.
    ///
    /// Output is also captured and delivered to registered observers exactly
    /// as with [`read`](Self::read).
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Exit`](crate::error::CommandError::Exit) if the
    /// process exits nonzero or is killed by a signal, and
    /// [`CommandError::Spawn`](crate::error::CommandError::Spawn) if it cannot
    /// be created.
    pub async fn run(self) -> CommandOutcome {
        self.execute(Echo::Terminal).await
    }

    /// Runs the command silently, only capturing its output.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn read(self) -> CommandOutcome {
        self.execute(Echo::Silent).await
    }

    async fn execute(self, echo: Echo) -> CommandOutcome {
        let started = Instant::now();
        let cmd_line = self.command_line();
        let parts = self.into_parts();
        let mut observers = parts.observers;

        let anchor = std::env::current_dir();
        let fragments = parts.cwd_base.iter().chain(&parts.cwd_extra);
        let cwd = match &anchor {
            Ok(anchor) => path::resolve(anchor, fragments),
            Err(_) => path::resolve("", fragments),
        };
        let mut state = ExecutionState::new(started, cwd);
        if let Err(err) = anchor {
            warn!(error = %err, "cannot determine current directory");
            return state.settle(parts.executable, parts.args, Settlement::SpawnFailed(err));
        }

        debug!(cwd = %state.cwd.display(), "cd");
        debug!(cmd = %cmd_line, "exec");

        let mut command = ProcessCommand::new(&parts.executable);
        command
            .args(&parts.args)
            .current_dir(&state.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        {
            command.creation_flags(windows::Win32::System::Threading::CREATE_NO_WINDOW.0);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                debug!(cmd = %cmd_line, error = %err, "spawn failed");
                return state.settle(parts.executable, parts.args, Settlement::SpawnFailed(err));
            }
        };

        let pid = child.id();
        trace!(executable = %parts.executable, pid = ?pid, "spawned");
        observers.notify_spawn(&SpawnInfo {
            executable: parts.executable.clone(),
            args: parts.args.clone(),
            cwd: state.cwd.clone(),
            pid,
        });

        stream_output(
            (child.stdout.take(), child.stderr.take()),
            &mut state,
            &mut observers,
            (parts.stdout_encoding, parts.stderr_encoding),
            &mut Mirror::terminal(echo),
        )
        .await;

        let settlement = match child.wait().await {
            Ok(status) => Settlement::Exited(status),
            Err(err) => {
                warn!(cmd = %cmd_line, error = %err, "failed waiting for process");
                Settlement::WaitFailed
            }
        };
        state.settle(parts.executable, parts.args, settlement)
    }
}
