// BuildSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies. These types are the shared vocabulary across all layers.

use crate::util::constants;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Keywords
// =============================================================================

/// A fixed trigger string that marks an error context in a build log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Gradle task failure, e.g. `> Task :app:compileDebugKotlin FAILED`.
    Failed,
    /// Compiler and tool diagnostics, e.g. `Error: Cannot find module`.
    Error,
    /// Gradle failure summary header.
    WhatWentWrong,
}

impl Keyword {
    /// All keywords, in match-priority order.
    pub const ALL: [Keyword; 3] = [Keyword::Failed, Keyword::Error, Keyword::WhatWentWrong];

    /// The literal text searched for.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Failed => constants::ERROR_KEYWORDS[0],
            Self::Error => constants::ERROR_KEYWORDS[1],
            Self::WhatWentWrong => constants::ERROR_KEYWORDS[2],
        }
    }

    /// First keyword contained in `text`, if any (case-sensitive substring).
    pub fn find_in(text: &str) -> Option<Keyword> {
        Self::ALL.into_iter().find(|k| text.contains(k.as_str()))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Loaded text
// =============================================================================

/// Character encoding a log file was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 with lossy substitution. The default.
    Utf8,
    /// UTF-16 little-endian with lossy substitution. Typical of logs captured
    /// through a PowerShell `>` redirect.
    Utf16Le,
}

impl TextEncoding {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full text of a log file, read once.
#[derive(Debug, Clone)]
pub struct LoadedText {
    /// Path the text was read from.
    pub path: PathBuf,
    /// Encoding that produced `content`.
    pub encoding: TextEncoding,
    /// Decoded file contents, line endings translated to `\n`.
    pub content: String,
}

// =============================================================================
// Scan output
// =============================================================================

/// Tunables for a scan run. Keywords are fixed and not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Lines printed after each matching line.
    pub context_lines: usize,
    /// Characters printed from the end of the text when nothing matches.
    pub tail_chars: usize,
    /// Files larger than this many bytes are memory-mapped when read.
    pub large_file_threshold: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            context_lines: constants::DEFAULT_CONTEXT_LINES,
            tail_chars: constants::DEFAULT_TAIL_CHARS,
            large_file_threshold: constants::DEFAULT_LARGE_FILE_THRESHOLD,
        }
    }
}

/// One matching line plus the lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    /// Zero-based index of the matching line.
    pub line_index: usize,
    /// The keyword that triggered this window.
    pub keyword: Keyword,
    /// The matching line itself.
    pub line: &'a str,
    /// Up to `ScanOptions::context_lines` lines after the match, verbatim.
    pub following: Vec<&'a str>,
}

/// Outcome of scanning one log file. Borrows from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanReport<'a> {
    /// At least one keyword was found; one window per matching line.
    Matches(Vec<ContextWindow<'a>>),
    /// No keyword anywhere; the trailing excerpt of the text.
    Tail(&'a str),
}

impl ScanReport<'_> {
    /// True if the report carries error context rather than a tail.
    pub fn has_matches(&self) -> bool {
        matches!(self, Self::Matches(_))
    }
}
