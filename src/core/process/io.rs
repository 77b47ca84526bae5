// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stream multiplexing and output capture.
//!
//! ```text
//! stream_output()     one task, no locks
//!   select! { stdout pipe, stderr pipe }
//!     bytes --StreamDecoder--> chunk
//!     chunk --> stdout|stderr buffer + output buffer
//!           --> channel observer, then output observer
//!           --> own stdout|stderr   (Echo::Terminal only)
//!   until both pipes reach EOF
//! ```

use std::path::PathBuf;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace, warn};

use super::observer::Observers;
use super::output::Signal;
use crate::utility::encoding::{Encoding, StreamDecoder};

/// Read size for a single pipe read.
const CHUNK_SIZE: usize = 8192;

/// Output channel of the child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Channel {
    Stdout,
    Stderr,
}

impl Channel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Whether chunks are mirrored to this process's own stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Echo {
    Silent,
    Terminal,
}

/// Mutable state of a single execution.
#[derive(Debug)]
pub(super) struct ExecutionState {
    pub(super) started: Instant,
    pub(super) cwd: PathBuf,
    pub(super) stdout: String,
    pub(super) stderr: String,
    pub(super) output: String,
    pub(super) exit_code: Option<i32>,
    pub(super) signal: Option<Signal>,
}

impl ExecutionState {
    pub(super) const fn new(started: Instant, cwd: PathBuf) -> Self {
        Self {
            started,
            cwd,
            stdout: String::new(),
            stderr: String::new(),
            output: String::new(),
            exit_code: None,
            signal: None,
        }
    }

    fn append(&mut self, channel: Channel, chunk: &str) {
        match channel {
            Channel::Stdout => self.stdout.push_str(chunk),
            Channel::Stderr => self.stderr.push_str(chunk),
        }
        self.output.push_str(chunk);
    }
}

/// One child pipe with its decoder.
struct Pipe<R> {
    reader: Option<R>,
    decoder: StreamDecoder,
    buf: Box<[u8]>,
    channel: Channel,
}

impl<R: AsyncRead + Unpin> Pipe<R> {
    fn new(reader: Option<R>, encoding: Encoding, channel: Channel) -> Self {
        Self {
            reader,
            decoder: StreamDecoder::new(encoding),
            buf: vec![0; CHUNK_SIZE].into_boxed_slice(),
            channel,
        }
    }

    const fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Reads the next decoded chunk.
    ///
    /// Returns `None` when a read produced no text (EOF with nothing held
    /// back). Never resolves once the pipe is closed.
    async fn next_chunk(&mut self) -> Option<String> {
        let Some(reader) = self.reader.as_mut() else {
            return std::future::pending().await;
        };
        loop {
            match reader.read(&mut self.buf).await {
                Ok(0) => break,
                Ok(n) => {
                    let text = self.decoder.decode(&self.buf[..n]);
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
                Err(e) => {
                    warn!(stream = self.channel.as_str(), error = %e, "error reading stream");
                    break;
                }
            }
        }
        self.reader = None;
        let tail = self.decoder.finish();
        (!tail.is_empty()).then_some(tail)
    }
}

/// Destination for mirrored chunks, one sink per channel.
///
/// Nothing is written in [`Echo::Silent`] mode.
pub(super) struct Mirror<O, E> {
    echo: Echo,
    pub(super) stdout: O,
    pub(super) stderr: E,
}

impl Mirror<tokio::io::Stdout, tokio::io::Stderr> {
    /// Mirrors to this process's own stdout/stderr.
    pub(super) fn terminal(echo: Echo) -> Self {
        Self::new(echo, tokio::io::stdout(), tokio::io::stderr())
    }
}

impl<O, E> Mirror<O, E>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    pub(super) const fn new(echo: Echo, stdout: O, stderr: E) -> Self {
        Self {
            echo,
            stdout,
            stderr,
        }
    }

    async fn write(&mut self, channel: Channel, chunk: &str) {
        if self.echo == Echo::Silent {
            return;
        }
        let result = match channel {
            Channel::Stdout => write_flush(&mut self.stdout, chunk).await,
            Channel::Stderr => write_flush(&mut self.stderr, chunk).await,
        };
        if let Err(e) = result {
            debug!(stream = channel.as_str(), error = %e, "failed to mirror chunk");
        }
    }
}

async fn write_flush<W: AsyncWrite + Unpin>(writer: &mut W, chunk: &str) -> std::io::Result<()> {
    writer.write_all(chunk.as_bytes()).await?;
    writer.flush().await
}

/// Streams both pipes to completion.
///
/// Chunks are handled one at a time in arrival order, so the output buffer
/// is the true interleaving of both streams. A `None` pipe counts as closed.
pub(super) async fn stream_output<R1, R2, O, E>(
    pipes: (Option<R1>, Option<R2>),
    state: &mut ExecutionState,
    observers: &mut Observers,
    encodings: (Encoding, Encoding),
    mirror: &mut Mirror<O, E>,
) where
    R1: AsyncRead + Unpin,
    R2: AsyncRead + Unpin,
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let mut stdout = Pipe::new(pipes.0, encodings.0, Channel::Stdout);
    let mut stderr = Pipe::new(pipes.1, encodings.1, Channel::Stderr);

    while stdout.is_open() || stderr.is_open() {
        let (channel, chunk) = tokio::select! {
            chunk = stdout.next_chunk() => (Channel::Stdout, chunk),
            chunk = stderr.next_chunk() => (Channel::Stderr, chunk),
        };
        let Some(chunk) = chunk else {
            continue;
        };

        trace!(stream = channel.as_str(), bytes = chunk.len(), "chunk");
        state.append(channel, &chunk);
        observers.notify_chunk(channel, &chunk);
        mirror.write(channel, &chunk).await;
    }
}
