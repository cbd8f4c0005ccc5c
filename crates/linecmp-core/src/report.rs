//! Mismatch report produced by a comparison run

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The first pair of lines that differ, with the context leading up to it
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("mismatch in line {line1} ({line2})")]
pub struct MismatchReport {
    /// Line number relative to the first compared pair (1-based)
    pub line: usize,
    /// Absolute line number in the first source (`line + skip1`)
    pub line1: usize,
    /// Absolute line number in the second source (`line + skip2`)
    pub line2: usize,
    /// Display name of the first source
    pub source1: String,
    /// Display name of the second source
    pub source2: String,
    /// Mismatching line from the first source, trailing whitespace removed
    pub text1: String,
    /// Mismatching line from the second source, trailing whitespace removed
    pub text2: String,
    /// `^` under every differing column, blank elsewhere
    pub marker: String,
    /// Matching lines preceding the mismatch, oldest first
    pub context: Vec<String>,
}

/// Build the marker row for two lines.
///
/// The result is as long (in chars) as the longer line. Only columns inside
/// the shorter line's length can carry a `^`; the tail of the longer line is
/// left blank.
pub fn marker_line(a: &str, b: &str) -> String {
    let width = a.chars().count().max(b.chars().count());
    let mut marker = vec![' '; width];
    for (i, (ca, cb)) in a.chars().zip(b.chars()).enumerate() {
        if ca != cb {
            marker[i] = '^';
        }
    }
    marker.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_single_char() {
        assert_eq!(marker_line("b", "x"), "^");
    }

    #[test]
    fn test_marker_equal_columns_blank() {
        assert_eq!(marker_line("abcd", "abXd"), "  ^ ");
    }

    #[test]
    fn test_marker_tail_not_flagged() {
        let marker = marker_line("abc", "abcdef");
        assert_eq!(marker, "      ");
        assert_eq!(marker.len(), 6);

        assert_eq!(marker_line("xbcdef", "abc"), "^     ");
    }

    #[test]
    fn test_marker_counts_chars_not_bytes() {
        let marker = marker_line("héllo", "hallo");
        assert_eq!(marker.chars().count(), 5);
        assert_eq!(marker, " ^   ");
    }

    #[test]
    fn test_marker_empty_line() {
        assert_eq!(marker_line("", "abc"), "   ");
        assert_eq!(marker_line("", ""), "");
    }

    #[test]
    fn test_report_display() {
        let report = MismatchReport {
            line: 2,
            line1: 4,
            line2: 2,
            source1: "a.log".into(),
            source2: "b.log".into(),
            text1: "b".into(),
            text2: "x".into(),
            marker: "^".into(),
            context: vec!["a".into()],
        };

        assert_eq!(report.to_string(), "mismatch in line 4 (2)");
    }

    #[test]
    fn test_report_serializes_fields() {
        let report = MismatchReport {
            line: 1,
            line1: 1,
            line2: 3,
            source1: "a.log".into(),
            source2: "b.log:2".into(),
            text1: "foo".into(),
            text2: "fox".into(),
            marker: "  ^".into(),
            context: Vec::new(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["line2"], 3);
        assert_eq!(value["marker"], "  ^");
        assert!(value["context"].as_array().unwrap().is_empty());
    }
}
