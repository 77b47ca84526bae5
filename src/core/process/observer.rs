// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-channel observer slots.
//!
//! ```text
//! on_spawn   FnMut(&SpawnInfo)   once, after creation
//! on_stdout  FnMut(&str)         each stdout chunk
//! on_stderr  FnMut(&str)         each stderr chunk
//! on_output  FnMut(&str)         every chunk, after the channel observer
//! ```
//!
//! One slot per channel: registering again replaces the previous observer.
//! A panicking observer is logged and dropped from its slot; buffering and
//! the other observers carry on.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;

use tracing::warn;

use super::io::Channel;

/// Observer for stdout, stderr or combined output chunks.
pub type ChunkObserver = Box<dyn FnMut(&str) + Send>;

/// Observer notified once the process has been created.
pub type SpawnObserver = Box<dyn FnMut(&SpawnInfo) + Send>;

/// What was started, passed to the spawn observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnInfo {
    pub executable: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// OS process id, if still available.
    pub pid: Option<u32>,
}

#[derive(Default)]
pub(super) struct Observers {
    spawn: Option<SpawnObserver>,
    stdout: Option<ChunkObserver>,
    stderr: Option<ChunkObserver>,
    output: Option<ChunkObserver>,
}

impl Observers {
    pub(super) fn set_spawn(&mut self, observer: SpawnObserver) {
        self.spawn = Some(observer);
    }

    pub(super) fn set_stdout(&mut self, observer: ChunkObserver) {
        self.stdout = Some(observer);
    }

    pub(super) fn set_stderr(&mut self, observer: ChunkObserver) {
        self.stderr = Some(observer);
    }

    pub(super) fn set_output(&mut self, observer: ChunkObserver) {
        self.output = Some(observer);
    }

    pub(super) fn notify_spawn(&mut self, info: &SpawnInfo) {
        guarded(&mut self.spawn, "spawn", |observer| observer(info));
    }

    /// Delivers a chunk to the channel observer, then to the output observer.
    pub(super) fn notify_chunk(&mut self, channel: Channel, chunk: &str) {
        match channel {
            Channel::Stdout => guarded(&mut self.stdout, "stdout", |observer| observer(chunk)),
            Channel::Stderr => guarded(&mut self.stderr, "stderr", |observer| observer(chunk)),
        }
        guarded(&mut self.output, "output", |observer| observer(chunk));
    }
}

fn guarded<F: ?Sized>(slot: &mut Option<Box<F>>, name: &str, call: impl FnOnce(&mut F)) {
    let Some(observer) = slot.as_deref_mut() else {
        return;
    };
    if catch_unwind(AssertUnwindSafe(|| call(observer))).is_err() {
        warn!(observer = name, "observer panicked, removing it");
        *slot = None;
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("spawn", &self.spawn.is_some())
            .field("stdout", &self.stdout.is_some())
            .field("stderr", &self.stderr.is_some())
            .field("output", &self.output.is_some())
            .finish()
    }
}
