// BuildSleuth - core/scanner.rs
//
// Keyword scan over the full text of a build log.
// Core layer: pure logic, no I/O or UI dependencies.
//
// The whole-text check runs first; only when some keyword is present is the
// text split into lines and walked. Every matching line gets its own window,
// so windows overlap when matches are closer than `context_lines` apart.

use crate::core::model::{ContextWindow, Keyword, ScanOptions, ScanReport};

/// Split `text` into lines at the same boundaries as Python's
/// `str.splitlines()`: `\n`, `\r\n`, a lone `\r`, vertical tab, form feed,
/// the file/group/record separators `\x1c`-`\x1e`, NEL (`\u{85}`), and the
/// Unicode line and paragraph separators. Line indices therefore agree with
/// tools built on that definition.
///
/// Terminators are not included. A trailing terminator does not yield an
/// extra empty line, and empty text yields no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some(&(_, '\n'))) {
            chars.next();
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Returns true if any keyword occurs anywhere in `text`.
pub fn contains_keyword(text: &str) -> bool {
    Keyword::find_in(text).is_some()
}

/// The final `max_chars` characters of `text`, or all of it when shorter.
pub fn tail_chars(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }
    match text.char_indices().rev().nth(max_chars - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Scan `content` and build the report.
pub fn scan<'a>(content: &'a str, options: &ScanOptions) -> ScanReport<'a> {
    if !contains_keyword(content) {
        tracing::debug!(tail_chars = options.tail_chars, "No keyword found, taking tail");
        return ScanReport::Tail(tail_chars(content, options.tail_chars));
    }

    let lines = split_lines(content);
    let windows: Vec<ContextWindow<'a>> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, &line)| {
            let keyword = Keyword::find_in(line)?;
            let end = (i + 1 + options.context_lines).min(lines.len());
            Some(ContextWindow {
                line_index: i,
                keyword,
                line,
                following: lines[i + 1..end].to_vec(),
            })
        })
        .collect();

    tracing::debug!(
        lines = lines.len(),
        windows = windows.len(),
        "Keyword scan complete"
    );

    ScanReport::Matches(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_split_lines_mixed_terminators() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_lines_on_form_feed_and_unicode_separators() {
        assert_eq!(
            split_lines("a\x0cb\x0bc\x1ed\u{85}e\u{2028}f\u{2029}g"),
            vec!["a", "b", "c", "d", "e", "f", "g"]
        );
    }

    #[test]
    fn test_form_feed_shifts_line_index() {
        let content = "page one\x0cpage two\nBUILD FAILED";
        let ScanReport::Matches(windows) = scan(content, &ScanOptions::default()) else {
            panic!("expected matches");
        };
        assert_eq!(windows[0].line_index, 2);
    }

    #[test]
    fn test_split_lines_trailing_and_empty() {
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_tail_chars_counts_characters_not_bytes() {
        assert_eq!(tail_chars("héllo", 4), "éllo");
        assert_eq!(tail_chars("abc", 10), "abc");
        assert_eq!(tail_chars("abc", 0), "");
    }

    #[test]
    fn test_scan_without_keywords_returns_tail() {
        let content = "x".repeat(5000);
        let report = scan(&content, &ScanOptions::default());
        match report {
            ScanReport::Tail(t) => assert_eq!(t.len(), 2000),
            other => panic!("expected tail, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_lowercase_is_not_a_match() {
        let report = scan("build failed\nerror: nope\n", &ScanOptions::default());
        assert!(!report.has_matches());
    }

    #[test]
    fn test_scan_window_has_24_following_lines() {
        let mut lines = numbered(40);
        lines[5] = "> Task :app:mergeDexDebug FAILED".to_string();
        let content = lines.join("\n");

        let ScanReport::Matches(windows) = scan(&content, &ScanOptions::default()) else {
            panic!("expected matches");
        };
        assert_eq!(windows.len(), 1);
        let w = &windows[0];
        assert_eq!(w.line_index, 5);
        assert_eq!(w.keyword, Keyword::Failed);
        assert_eq!(w.following.len(), 24);
        assert_eq!(w.following[0], "line 6");
        assert_eq!(w.following[23], "line 29");
    }

    #[test]
    fn test_scan_window_truncated_at_end_of_file() {
        let content = "ok\nok\nBUILD FAILED\nlast one";
        let ScanReport::Matches(windows) = scan(content, &ScanOptions::default()) else {
            panic!("expected matches");
        };
        assert_eq!(windows[0].line_index, 2);
        assert_eq!(windows[0].following, vec!["last one"]);
    }

    #[test]
    fn test_scan_overlapping_windows_each_reported() {
        let content = "Error one\nError two\ntrailer";
        let ScanReport::Matches(windows) = scan(content, &ScanOptions::default()) else {
            panic!("expected matches");
        };
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].following, vec!["Error two", "trailer"]);
        assert_eq!(windows[1].following, vec!["trailer"]);
    }

    #[test]
    fn test_scan_what_went_wrong_triggers_scan() {
        let content = "* What went wrong:\nExecution failed for task ':app:lint'.";
        let report = scan(content, &ScanOptions::default());
        let ScanReport::Matches(windows) = report else {
            panic!("expected matches");
        };
        assert_eq!(windows[0].keyword, Keyword::WhatWentWrong);
    }

    #[test]
    fn test_scan_respects_custom_context() {
        let content = "FAILED\na\nb\nc";
        let opts = ScanOptions {
            context_lines: 2,
            ..Default::default()
        };
        let ScanReport::Matches(windows) = scan(content, &opts) else {
            panic!("expected matches");
        };
        assert_eq!(windows[0].following, vec!["a", "b"]);
    }
}
