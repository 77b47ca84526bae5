// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lexical path resolution.
//!
//! ```text
//! resolve("/work", ["a", "../b", "/abs", "c"])
//!   /work -> /work/a -> /work/b -> /abs -> /abs/c
//! ```
//!
//! Purely lexical: no filesystem access, symlinks are not followed.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path lexically, dropping `.` and folding `..`.
///
/// `..` never climbs above the root of an absolute path. A relative path
/// that folds to nothing becomes `.`.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(part) => normalized.push(part),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Resolves `fragments` one after another on top of `base`.
///
/// Each step joins the fragment onto the running result and normalizes it,
/// so an absolute fragment discards everything resolved before it.
///
/// # Example
/// ```
/// use runcmd::utility::path::resolve;
/// use std::path::PathBuf;
///
/// # #[cfg(unix)]
/// # {
/// assert_eq!(resolve("/srv", ["app", "../logs"]), PathBuf::from("/srv/logs"));
/// assert_eq!(resolve("/srv", ["app", "/tmp", "x"]), PathBuf::from("/tmp/x"));
/// # }
/// ```
#[must_use]
pub fn resolve<B, I, P>(base: B, fragments: I) -> PathBuf
where
    B: AsRef<Path>,
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    fragments
        .into_iter()
        .fold(normalize(base.as_ref()), |resolved, fragment| {
            normalize(&resolved.join(fragment))
        })
}

#[cfg(test)]
mod tests;
