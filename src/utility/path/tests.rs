// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{normalize, resolve};
use std::path::{Path, PathBuf};

#[test]
fn test_normalize_relative() {
    let cases = vec![
        ("a/./b", normalize(Path::new("a/./b"))),
        ("a/../..", normalize(Path::new("a/../.."))),
        ("./", normalize(Path::new("./"))),
        ("a/b/../c", normalize(Path::new("a/b/../c"))),
    ];
    insta::assert_debug_snapshot!(cases, @r#"
    [
        (
            "a/./b",
            "a/b",
        ),
        (
            "a/../..",
            "..",
        ),
        (
            "./",
            ".",
        ),
        (
            "a/b/../c",
            "a/c",
        ),
    ]
    "#);
}

#[cfg(unix)]
#[test]
fn test_normalize_does_not_climb_above_root() {
    assert_eq!(normalize(Path::new("/../../etc")), PathBuf::from("/etc"));
    assert_eq!(normalize(Path::new("/a/b/../../..")), PathBuf::from("/"));
}

#[cfg(unix)]
#[test]
fn test_resolve_sequential_join() {
    let stepwise = resolve(resolve("/a", Vec::<&str>::new()), ["b"]);
    assert_eq!(resolve("/a", ["b"]), stepwise);
    assert_eq!(stepwise, PathBuf::from("/a/b"));
}

#[cfg(unix)]
#[test]
fn test_resolve_absolute_fragment_overrides() {
    assert_eq!(resolve("/a", ["b", "/c", "d"]), PathBuf::from("/c/d"));
    assert_eq!(resolve("/a", ["/"]), PathBuf::from("/"));
}

#[cfg(unix)]
#[test]
fn test_resolve_empty_and_dot_fragments() {
    assert_eq!(resolve("/a/b", ["", ".", "c/"]), PathBuf::from("/a/b/c"));
    assert_eq!(resolve("/a/b", [".."]), PathBuf::from("/a"));
}

#[cfg(windows)]
#[test]
fn test_resolve_windows_drive_override() {
    assert_eq!(
        resolve(r"C:\work", ["src", r"D:\other", ".."]),
        PathBuf::from(r"D:\")
    );
}
