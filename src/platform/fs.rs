// BuildSleuth - platform/fs.rs
//
// Whole-file reads and encoding fallback for log files.
//
// The file is opened in a scoped read; the handle is closed on every exit
// path including decode failure. Files above the caller's size threshold are
// memory-mapped instead of copied onto the heap. A read that hits a transient
// I/O error (WouldBlock, Interrupted, TimedOut) is repeated after a short
// backoff; any other error ends the read.

use crate::core::encoding;
use crate::core::model::{LoadedText, TextEncoding};
use crate::util::constants::READ_RETRY_BACKOFF_MS;
use crate::util::error::DecodeError;
use std::borrow::Cow;
use std::io;
use std::ops::Deref;
use std::path::Path;
use std::time::Duration;

/// Raw file bytes, either heap-owned or memory-mapped.
pub enum FileBytes {
    Heap(Vec<u8>),
    Mapped(memmap2::Mmap),
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Heap(v) => v,
            Self::Mapped(m) => m,
        }
    }
}

/// Read the full content of a file as bytes, mapping it when it is larger
/// than `large_file_threshold` bytes.
pub fn read_bytes(path: &Path, large_file_threshold: u64) -> io::Result<FileBytes> {
    let size = std::fs::metadata(path)?.len();
    if size > 0 && size > large_file_threshold {
        tracing::debug!(file = %path.display(), size, "Memory-mapping large file");
        map_file(path)
    } else {
        read_retrying(path).map(FileBytes::Heap)
    }
}

fn map_file(path: &Path) -> io::Result<FileBytes> {
    let file = std::fs::File::open(path)?;
    // SAFETY: the map is read-only and never mutated. External modification
    // of the file during the map's lifetime is an accepted risk for a tool
    // that reads already-written build logs.
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    Ok(FileBytes::Mapped(mmap))
}

fn read_retrying(path: &Path) -> io::Result<Vec<u8>> {
    let mut backoff = READ_RETRY_BACKOFF_MS.iter();
    loop {
        let err = match std::fs::read(path) {
            Ok(bytes) => return Ok(bytes),
            Err(e) => e,
        };
        match backoff.next() {
            Some(&ms) if is_transient(err.kind()) => {
                tracing::debug!(
                    file = %path.display(),
                    backoff_ms = ms,
                    error = %err,
                    "Transient read failure"
                );
                std::thread::sleep(Duration::from_millis(ms));
            }
            _ => return Err(err),
        }
    }
}

fn is_transient(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
    )
}

/// Load a log file as text: UTF-8 first, UTF-16LE as the fallback.
///
/// UTF-8 is decoded lossily and is only set aside when the bytes carry a
/// UTF-16LE signature. If the first read fails outright, the file is read
/// again for the UTF-16LE attempt; a second failure is a `DecodeError`.
/// Line endings in the returned text are translated to `\n`.
pub fn load_text(path: &Path, large_file_threshold: u64) -> Result<LoadedText, DecodeError> {
    let (text_encoding, content) = match read_bytes(path, large_file_threshold) {
        Ok(bytes) if encoding::looks_like_utf16le(&bytes) => {
            tracing::info!(file = %path.display(), "UTF-16LE signature, decoding as UTF-16LE");
            (TextEncoding::Utf16Le, encoding::decode_utf16le_lossy(&bytes))
        }
        Ok(bytes) => {
            let text = encoding::decode_utf8_lossy(&bytes);
            if let Cow::Owned(_) = text {
                tracing::warn!(
                    file = %path.display(),
                    "Invalid UTF-8 sequences replaced with U+FFFD"
                );
            }
            (TextEncoding::Utf8, text.into_owned())
        }
        Err(primary) => {
            tracing::warn!(
                file = %path.display(),
                error = %primary,
                "UTF-8 read failed, retrying as UTF-16LE"
            );
            match read_bytes(path, large_file_threshold) {
                Ok(bytes) => (TextEncoding::Utf16Le, encoding::decode_utf16le_lossy(&bytes)),
                Err(fallback) => {
                    return Err(DecodeError {
                        path: path.to_path_buf(),
                        primary,
                        fallback,
                    })
                }
            }
        }
    };

    Ok(LoadedText {
        path: path.to_path_buf(),
        encoding: text_encoding,
        content: encoding::normalize_newlines(content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::DEFAULT_LARGE_FILE_THRESHOLD;
    use std::fs;
    use tempfile::TempDir;

    fn load(path: &Path) -> Result<LoadedText, DecodeError> {
        load_text(path, DEFAULT_LARGE_FILE_THRESHOLD)
    }

    #[test]
    fn test_load_utf8_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.log");
        fs::write(&path, "BUILD FAILED in 12s\n").unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.encoding, TextEncoding::Utf8);
        assert_eq!(loaded.content, "BUILD FAILED in 12s\n");
        assert_eq!(loaded.path, path);
    }

    /// A single cp1252 byte must not push a UTF-8 log into the UTF-16LE path.
    #[test]
    fn test_load_utf8_with_stray_byte_stays_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.log");
        let mut bytes = b"> Task :app:compileDebugKotlin FAILED\ne: C:\\Users\\Ren".to_vec();
        bytes.push(0xE9);
        bytes.extend(b"e\\App.kt: Unresolved reference\n");
        fs::write(&path, &bytes).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.encoding, TextEncoding::Utf8);
        assert!(loaded
            .content
            .starts_with("> Task :app:compileDebugKotlin FAILED\ne: C:\\Users\\Ren\u{FFFD}e"));
    }

    #[test]
    fn test_load_falls_back_to_utf16le() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ps-redirect.log");
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("FAILURE: Build failed\r\n".encode_utf16().flat_map(|u| u.to_le_bytes()));
        fs::write(&path, &bytes).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.encoding, TextEncoding::Utf16Le);
        assert_eq!(loaded.content, "FAILURE: Build failed\n");
    }

    #[test]
    fn test_load_translates_line_endings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crlf.log");
        fs::write(&path, "one\r\ntwo\rthree\n").unwrap();

        assert_eq!(load(&path).unwrap().content, "one\ntwo\nthree\n");
    }

    #[test]
    fn test_load_directory_fails_both_attempts() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert_eq!(err.path, dir.path());
    }

    #[test]
    fn test_read_bytes_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_bytes(&dir.path().join("nope.log"), DEFAULT_LARGE_FILE_THRESHOLD)
            .err()
            .unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_bytes_maps_files_over_threshold() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.log");
        fs::write(&path, "BUILD FAILED\n").unwrap();

        let mapped = read_bytes(&path, 4).unwrap();
        assert!(matches!(mapped, FileBytes::Mapped(_)));
        assert_eq!(&*mapped, b"BUILD FAILED\n");

        let heap = read_bytes(&path, 1024).unwrap();
        assert!(matches!(heap, FileBytes::Heap(_)));

        let loaded = load_text(&path, 4).unwrap();
        assert_eq!(loaded.content, "BUILD FAILED\n");
    }

    #[test]
    fn test_empty_file_is_never_mapped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.log");
        fs::write(&path, "").unwrap();

        let bytes = read_bytes(&path, 0).unwrap();
        assert!(matches!(bytes, FileBytes::Heap(_)));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_transient_error_classification() {
        assert!(is_transient(io::ErrorKind::Interrupted));
        assert!(!is_transient(io::ErrorKind::NotFound));
    }
}
