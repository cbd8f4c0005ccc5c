//! Output rendering for comparison results

use linecmp_core::{MismatchReport, Verdict};
use serde::Serialize;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Gap between the label column and the line text
const LABEL_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Prefix mismatching lines with `source:line` and pad them to equal width
    pub labels: bool,
    /// Finish with the mismatching LOG2 line number (0 on a match)
    pub lineno: bool,
}

/// JSON shape of a comparison result
#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum JsonOutcome<'a> {
    #[serde(rename = "ok")]
    Match { compared: usize },
    #[serde(rename = "mismatch")]
    Mismatch(&'a MismatchReport),
}

impl<'a> From<&'a Verdict> for JsonOutcome<'a> {
    fn from(verdict: &'a Verdict) -> Self {
        match verdict {
            Verdict::Match { compared } => JsonOutcome::Match {
                compared: *compared,
            },
            Verdict::Mismatch(report) => JsonOutcome::Mismatch(report),
        }
    }
}

pub fn write_verdict<W: Write>(
    out: &mut W,
    verdict: &Verdict,
    opts: RenderOptions,
) -> io::Result<()> {
    match verdict {
        Verdict::Match { .. } => write_match(out, opts),
        Verdict::Mismatch(report) => write_mismatch(out, report, opts),
    }
}

pub fn write_match<W: Write>(out: &mut W, opts: RenderOptions) -> io::Result<()> {
    writeln!(out, "OK")?;
    if opts.lineno {
        writeln!(out, "0")?;
    }
    Ok(())
}

pub fn write_mismatch<W: Write>(
    out: &mut W,
    report: &MismatchReport,
    opts: RenderOptions,
) -> io::Result<()> {
    for line in &report.context {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    writeln!(out, "mismatch in line {} ({}):", report.line1, report.line2)?;

    if opts.labels {
        let label1 = format!("{}:{}", report.source1, report.line1);
        let label2 = format!("{}:{}", report.source2, report.line2);
        let label_width = label1.width().max(label2.width());
        let text_width = report.text1.width().max(report.text2.width());

        writeln!(
            out,
            "{}{LABEL_GAP}{}",
            pad(&label1, label_width),
            pad(&report.text1, text_width)
        )?;
        writeln!(
            out,
            "{}{LABEL_GAP}{}",
            pad(&label2, label_width),
            pad(&report.text2, text_width)
        )?;
        writeln!(out, "{}{LABEL_GAP}{}", " ".repeat(label_width), report.marker)?;
    } else {
        writeln!(out, "{}", report.text1)?;
        writeln!(out, "{}", report.text2)?;
        writeln!(out, "{}", report.marker)?;
    }

    if opts.lineno {
        writeln!(out, "{}", report.line2)?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, verdict: &Verdict) -> io::Result<()> {
    serde_json::to_writer(&mut *out, &JsonOutcome::from(verdict))?;
    writeln!(out)
}

/// Right-pad `text` with spaces to `width` display columns
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    let mut padded = String::with_capacity(text.len() + fill);
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(fill));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> MismatchReport {
        MismatchReport {
            line: 2,
            line1: 4,
            line2: 2,
            source1: "a.log".into(),
            source2: "b.log".into(),
            text1: "b".into(),
            text2: "xyz".into(),
            marker: "^  ".into(),
            context: vec!["a".into()],
        }
    }

    fn render(verdict: &Verdict, opts: RenderOptions) -> String {
        let mut out = Vec::new();
        write_verdict(&mut out, verdict, opts).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_match_output() {
        let verdict = Verdict::Match { compared: 3 };
        assert_eq!(render(&verdict, RenderOptions::default()), "OK\n");

        let opts = RenderOptions {
            lineno: true,
            ..Default::default()
        };
        assert_eq!(render(&verdict, opts), "OK\n0\n");
    }

    #[test]
    fn test_plain_mismatch_output() {
        let verdict = Verdict::Mismatch(report());
        assert_eq!(
            render(&verdict, RenderOptions::default()),
            "a\n\nmismatch in line 4 (2):\nb\nxyz\n^  \n"
        );
    }

    #[test]
    fn test_mismatch_lineno_is_last() {
        let verdict = Verdict::Mismatch(report());
        let opts = RenderOptions {
            lineno: true,
            ..Default::default()
        };
        let output = render(&verdict, opts);
        assert_eq!(output.lines().last(), Some("2"));
    }

    #[test]
    fn test_labelled_mismatch_output() {
        let verdict = Verdict::Mismatch(report());
        let opts = RenderOptions {
            labels: true,
            ..Default::default()
        };
        let output = render(&verdict, opts);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[3], "a.log:4  b  ");
        assert_eq!(lines[4], "b.log:2  xyz");
        assert_eq!(lines[5], "         ^  ");
    }

    #[test]
    fn test_labels_pad_by_display_width() {
        let mut wide = report();
        wide.source1 = "日本.log".into();
        let opts = RenderOptions {
            labels: true,
            ..Default::default()
        };
        let output = render(&Verdict::Mismatch(wide), opts);
        let lines: Vec<&str> = output.lines().collect();

        // "日本.log:4" is 10 columns wide
        assert_eq!(lines[4], "b.log:2     xyz");
        assert_eq!(lines[5].len(), 12 + 3);
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_json(&mut out, &Verdict::Match { compared: 7 }).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["compared"], 7);

        let mut out = Vec::new();
        write_json(&mut out, &Verdict::Mismatch(report())).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "mismatch");
        assert_eq!(value["line1"], 4);
        assert_eq!(value["text2"], "xyz");
        assert_eq!(value["context"][0], "a");
    }
}
