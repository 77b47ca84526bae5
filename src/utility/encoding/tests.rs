// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Encoding, StreamDecoder, bytes_to_utf8};

#[test]
fn test_utf8_passthrough() {
    let input = "Hello, 世界!";
    let result = bytes_to_utf8(Encoding::Utf8, input.as_bytes());
    insta::assert_snapshot!(result, @"Hello, 世界!");
}

#[test]
fn test_windows_1252_conversion() {
    // "café" in Windows-1252: 0x63 0x61 0x66 0xe9
    let input = b"caf\xe9";
    let result = bytes_to_utf8(Encoding::Acp, input);
    insta::assert_snapshot!(result, @"café");
}

#[test]
fn test_utf16_le_conversion() {
    // "Hi" in UTF-16 LE: 0x48 0x00 0x69 0x00
    let input = b"H\x00i\x00";
    let result = bytes_to_utf8(Encoding::Utf16Le, input);
    insta::assert_snapshot!(result, @"Hi");
}

#[test]
fn test_invalid_utf8_replaced() {
    let result = bytes_to_utf8(Encoding::Utf8, b"ok\xff");
    assert_eq!(result, "ok\u{FFFD}");
}

#[test]
fn test_stream_decoder_split_codepoint() {
    // "世" is E4 B8 96
    let mut decoder = StreamDecoder::new(Encoding::Utf8);
    let phases = vec![
        decoder.decode(b"a\xe4"),
        decoder.decode(b"\xb8"),
        decoder.decode(b"\x96b"),
        decoder.finish(),
    ];
    insta::assert_debug_snapshot!(phases, @r#"
    [
        "a",
        "",
        "世b",
        "",
    ]
    "#);
}

#[test]
fn test_stream_decoder_truncated_tail() {
    let mut decoder = StreamDecoder::new(Encoding::Utf8);
    assert_eq!(decoder.decode(b"x\xe4\xb8"), "x");
    assert_eq!(decoder.finish(), "\u{FFFD}");
}

#[test]
fn test_stream_decoder_utf16_odd_split() {
    let mut decoder = StreamDecoder::new(Encoding::Utf16Le);
    assert_eq!(decoder.decode(b"H\x00i"), "H");
    assert_eq!(decoder.decode(b"\x00"), "i");
    assert_eq!(decoder.encoding(), Encoding::Utf16Le);
}

#[test]
fn test_encoding_display_matches_serde_names() {
    for encoding in [
        Encoding::Utf8,
        Encoding::Utf16Le,
        Encoding::Acp,
        Encoding::Oem,
    ] {
        let json = serde_json::to_string(&encoding).unwrap();
        assert_eq!(json, format!("\"{encoding}\""));
    }
}
