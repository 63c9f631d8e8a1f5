// BuildSleuth - app/scan.rs
//
// One scan run: resolve the input path, load the text, scan it, and write
// the report. Synchronous and single-threaded; the first error ends the run.

use crate::core::model::{ScanOptions, ScanReport, TextEncoding};
use crate::core::{report, scanner};
use crate::platform::fs;
use crate::util::constants::DEFAULT_LOG_PATH;
use crate::util::error::{BuildSleuthError, Result};
use crate::util::logging;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Resolve the log path from an optional CLI argument.
pub fn resolve_input_path(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH))
}

/// Summary of a completed run, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Encoding the file was decoded with.
    pub encoding: TextEncoding,
    /// Number of context windows written. Zero when the tail was written.
    pub windows: usize,
    /// Characters in the decoded text.
    pub total_chars: usize,
}

/// Scan `path` and write the report to `out`.
///
/// Fails with `FileNotFound` when the path does not exist and with `Decode`
/// when neither encoding attempt can read it.
pub fn run_scan<W: Write>(path: &Path, options: &ScanOptions, mut out: W) -> Result<ScanOutcome> {
    if !path.exists() {
        tracing::debug!(file = %path.display(), "Input path does not exist");
        return Err(BuildSleuthError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    writeln!(out, "Reading {}...", path.display()).map_err(|e| output_error(path, e))?;

    let loaded = fs::load_text(path, options.large_file_threshold)?;
    tracing::info!(
        file = %loaded.path.display(),
        encoding = %loaded.encoding,
        bytes = loaded.content.len(),
        "Log loaded"
    );

    let report = scanner::scan(&loaded.content, options);
    if let ScanReport::Matches(windows) = &report {
        for w in windows {
            tracing::debug!(
                line = w.line_index,
                keyword = %w.keyword,
                text = logging::preview(w.line),
                "Keyword match"
            );
        }
    }

    report::write_report(&report, options, &mut out).map_err(|e| output_error(path, e))?;

    let windows = match &report {
        ScanReport::Matches(w) => w.len(),
        ScanReport::Tail(_) => 0,
    };
    Ok(ScanOutcome {
        encoding: loaded.encoding,
        windows,
        total_chars: loaded.content.chars().count(),
    })
}

fn output_error(path: &Path, source: std::io::Error) -> BuildSleuthError {
    BuildSleuthError::Io {
        path: path.to_path_buf(),
        operation: "report write",
        source,
    }
}
