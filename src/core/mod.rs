// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules.
//!
//! ```text
//!            core
//!             |
//!          process
//!             |
//!   Command   builder, observers
//!   runner    spawn, wait
//!   io        stream multiplexing
//!   output    CommandOutput, settlement
//! ```

pub mod process;
