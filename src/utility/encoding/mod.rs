// runcmd: Fluent Process Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Byte-to-text decoding for process output.
//!
//! ```text
//! pipe bytes --(StreamDecoder)--> UTF-8 chunks
//!   Utf8 (default) | Utf16Le | Acp (CP1252) | Oem (IBM866)
//! ```
//!
//! Uses `encoding_rs`. Invalid sequences → U+FFFD. Multi-byte sequences split
//! across reads are held back until the rest arrives.

use encoding_rs::{IBM866, UTF_8, UTF_16LE, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Encoding of a child process output stream.
///
/// Maps to Windows code pages:
/// - `Utf8`: UTF-8 (65001)
/// - `Utf16Le`: UTF-16 LE (1200)
/// - `Acp`: Active Code Page, typically Windows-1252 (1252)
/// - `Oem`: OEM Code Page, decoded as IBM866
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8 (code page 65001)
    #[default]
    Utf8,
    /// UTF-16 Little Endian (code page 1200)
    Utf16Le,
    /// Active Code Page - typically Windows-1252
    Acp,
    /// OEM Code Page
    Oem,
}

impl Encoding {
    const fn codec(self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Utf16Le => UTF_16LE,
            Self::Acp => WINDOWS_1252,
            Self::Oem => IBM866,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
            Self::Acp => "acp",
            Self::Oem => "oem",
        })
    }
}

/// Converts a complete byte buffer from the given encoding to UTF-8.
///
/// # Example
/// ```
/// use runcmd::utility::encoding::{bytes_to_utf8, Encoding};
///
/// let cp1252_bytes = b"caf\xe9"; // "café" in Windows-1252
/// let utf8 = bytes_to_utf8(Encoding::Acp, cp1252_bytes);
/// assert_eq!(utf8, "café");
/// ```
#[must_use]
pub fn bytes_to_utf8(encoding: Encoding, bytes: &[u8]) -> Cow<'_, str> {
    let (result, _had_errors) = encoding.codec().decode_without_bom_handling(bytes);
    result
}

/// Incremental decoder for one output stream.
///
/// Each call to [`decode`](Self::decode) returns the text that can be
/// produced from the bytes seen so far; an incomplete trailing sequence is
/// kept until the next call or until [`finish`](Self::finish).
///
/// # Example
/// ```
/// use runcmd::utility::encoding::{Encoding, StreamDecoder};
///
/// let mut decoder = StreamDecoder::new(Encoding::Utf8);
/// // "é" is 0xC3 0xA9; feed it across two reads
/// assert_eq!(decoder.decode(b"caf\xc3"), "caf");
/// assert_eq!(decoder.decode(b"\xa9!"), "é!");
/// assert_eq!(decoder.finish(), "");
/// ```
pub struct StreamDecoder {
    encoding: Encoding,
    decoder: encoding_rs::Decoder,
}

impl StreamDecoder {
    /// Creates a decoder for the given encoding.
    #[must_use]
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            decoder: encoding.codec().new_decoder_without_bom_handling(),
        }
    }

    /// Returns the encoding this decoder reads.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Decodes the next slice of bytes.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.decode_inner(bytes, false)
    }

    /// Flushes any held-back partial sequence (as U+FFFD) at end of stream.
    pub fn finish(&mut self) -> String {
        self.decode_inner(&[], true)
    }

    fn decode_inner(&mut self, bytes: &[u8], last: bool) -> String {
        let capacity = self
            .decoder
            .max_utf8_buffer_length(bytes.len())
            .unwrap_or_else(|| bytes.len().saturating_mul(3).saturating_add(16));
        let mut text = String::with_capacity(capacity);
        let (_result, _read, _had_errors) = self.decoder.decode_to_string(bytes, &mut text, last);
        text
    }
}

impl fmt::Debug for StreamDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
