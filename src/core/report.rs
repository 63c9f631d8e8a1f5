// BuildSleuth - core/report.rs
//
// Plain-text rendering of a scan report.
// Core layer: writes to any Write trait object.

use crate::core::model::{ScanOptions, ScanReport};
use crate::util::constants::WINDOW_SEPARATOR_WIDTH;
use std::io::{self, Write};

/// Write `report` as unstructured console text.
///
/// Matches: a banner, then per window `Line {index}: {line}`, the following
/// lines verbatim, and a dashed separator. Tail: a banner, then the excerpt.
pub fn write_report<W: Write>(
    report: &ScanReport<'_>,
    options: &ScanOptions,
    mut writer: W,
) -> io::Result<()> {
    match report {
        ScanReport::Matches(windows) => {
            writeln!(writer, "Found error keywords in logs. Extracting context...")?;
            let separator = "-".repeat(WINDOW_SEPARATOR_WIDTH);
            for window in windows {
                writeln!(writer, "Line {}: {}", window.line_index, window.line)?;
                for line in &window.following {
                    writeln!(writer, "{line}")?;
                }
                writeln!(writer, "{separator}")?;
            }
        }
        ScanReport::Tail(tail) => {
            writeln!(
                writer,
                "No error keywords found in logs. Printing last {} characters:",
                options.tail_chars
            )?;
            writeln!(writer, "{tail}")?;
        }
    }
    writer.flush()
}
