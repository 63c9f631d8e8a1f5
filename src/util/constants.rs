// BuildSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "BuildSleuth";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "BuildSleuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input
// =============================================================================

/// Log file scanned when no path is given on the command line.
pub const DEFAULT_LOG_PATH: &str = "android/build_error_10.2.0.log";

/// File size threshold in bytes above which the file is memory-mapped
/// rather than copied onto the heap.
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024; // 100 MB

/// Smallest configurable mapping threshold. Mapping tiny files costs more
/// than reading them.
pub const MIN_LARGE_FILE_THRESHOLD: u64 = 64 * 1024; // 64 KB

/// Backoff before each re-read after a transient I/O error (ms).
/// One entry per retry; the read gives up once these are spent.
pub const READ_RETRY_BACKOFF_MS: &[u64] = &[50, 100, 200];

/// Leading bytes inspected when deciding whether a file is UTF-16LE.
pub const UTF16_SNIFF_BYTES: usize = 4 * 1024;

// =============================================================================
// Scanning
// =============================================================================

/// Trigger strings. Matching is case-sensitive and unanchored.
pub const ERROR_KEYWORDS: [&str; 3] = ["FAILED", "Error", "What went wrong"];

/// Lines printed after each matching line.
pub const DEFAULT_CONTEXT_LINES: usize = 24;

/// Minimum user-configurable context line count.
pub const MIN_CONTEXT_LINES: usize = 1;

/// Maximum user-configurable context line count.
pub const MAX_CONTEXT_LINES: usize = 1_000;

/// Characters printed from the end of the file when no keyword is found.
pub const DEFAULT_TAIL_CHARS: usize = 2_000;

/// Minimum user-configurable tail size (characters).
pub const MIN_TAIL_CHARS: usize = 1;

/// Maximum user-configurable tail size (characters).
pub const MAX_TAIL_CHARS: usize = 1_000_000;

/// Separator printed after each context window.
pub const WINDOW_SEPARATOR_WIDTH: usize = 20;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at `warn` so stderr stays quiet for a CLI run.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
/// Prevents accidental exposure of sensitive data in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
