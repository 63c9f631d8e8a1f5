// BuildSleuth - core/encoding.rs
//
// Byte-to-text decoding for the two supported log encodings.
// Core layer: pure functions over byte slices, no I/O.
//
// UTF-8 is the primary encoding and is decoded lossily, so a stray cp1252
// byte in an otherwise UTF-8 log costs one U+FFFD, not the whole file. UTF-16LE
// is chosen only when the bytes carry its signature: a `FF FE` BOM, or NULs
// in the high-byte (odd) positions of the leading block, as left by a
// PowerShell `>` redirect of ASCII output.

use crate::util::constants::UTF16_SNIFF_BYTES;
use std::borrow::Cow;

/// Byte-order mark as it appears after decoding.
const BOM: char = '\u{FEFF}';

/// UTF-16LE byte-order mark as raw bytes.
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// True when `bytes` should be read as UTF-16LE rather than UTF-8.
pub fn looks_like_utf16le(bytes: &[u8]) -> bool {
    if bytes.starts_with(&UTF16LE_BOM) {
        return true;
    }

    let sample = &bytes[..bytes.len().min(UTF16_SNIFF_BYTES)];
    let (mut odd_nuls, mut even_nuls) = (0usize, 0usize);
    for (i, &b) in sample.iter().enumerate() {
        if b != 0 {
            continue;
        }
        if i % 2 == 1 {
            odd_nuls += 1;
        } else {
            even_nuls += 1;
        }
    }

    // At least a quarter of the high bytes are NUL, and NULs are rare in the
    // low bytes. Mostly-ASCII UTF-16LE passes; UTF-8 text has no NULs at all.
    let high_byte_slots = sample.len() / 2;
    odd_nuls > 0 && odd_nuls * 4 >= high_byte_slots && even_nuls * 4 <= odd_nuls
}

/// Lossy UTF-8 decode. Borrows from `bytes` when they are already valid;
/// an owned value means at least one sequence was replaced with U+FFFD.
pub fn decode_utf8_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Lossy UTF-16LE decode.
///
/// Unpaired surrogates and a trailing odd byte become U+FFFD. A leading
/// byte-order mark is dropped. Never fails.
pub fn decode_utf16le_lossy(bytes: &[u8]) -> String {
    let chunks = bytes.chunks_exact(2);
    let has_odd_byte = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    let mut text: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if has_odd_byte {
        text.push(char::REPLACEMENT_CHARACTER);
    }

    if text.starts_with(BOM) {
        text.drain(..BOM.len_utf8());
    }
    text
}

/// Translate `\r\n` and lone `\r` to `\n`.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
