//! First-divergence comparison engine

use crate::context::ContextBuffer;
use crate::report::{marker_line, MismatchReport};
use crate::source::LineSource;
use std::convert::Infallible;
use tracing::{debug, trace};

/// Outcome of a single comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every pair in the common prefix matched
    Match { compared: usize },
    /// The first differing pair
    Mismatch(MismatchReport),
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match { .. })
    }

    pub fn into_result(self) -> Result<(), MismatchReport> {
        match self {
            Verdict::Match { .. } => Ok(()),
            Verdict::Mismatch(report) => Err(report),
        }
    }
}

/// Compares two line sources pair by pair and stops at the first difference
pub struct LineComparator {
    /// Number of matching lines to keep for the report
    context_lines: usize,
}

impl Default for LineComparator {
    fn default() -> Self {
        Self { context_lines: 5 }
    }
}

impl LineComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    /// Compare two fallible line sources.
    ///
    /// Lines are paired by position until either source runs out; extra
    /// trailing lines on one side are ignored. Trailing whitespace is not
    /// significant. Reading stops at the first mismatch, and a read error from
    /// either side ends the run with that error.
    pub fn compare<L, R, S1, S2, E>(
        &self,
        mut left: LineSource<L>,
        mut right: LineSource<R>,
    ) -> Result<Verdict, E>
    where
        L: Iterator<Item = Result<S1, E>>,
        R: Iterator<Item = Result<S2, E>>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let mut context = ContextBuffer::new(self.context_lines);
        let mut line = 0usize;

        loop {
            // Right side is only pulled once the left side produced a line
            let a = match left.next() {
                Some(a) => a?,
                None => break,
            };
            let b = match right.next() {
                Some(b) => b?,
                None => break,
            };
            line += 1;

            let text1 = a.as_ref().trim_end();
            let text2 = b.as_ref().trim_end();

            if text1 == text2 {
                context.push(text1);
                continue;
            }

            trace!(line, "lines differ");
            let report = MismatchReport {
                line,
                line1: line + left.skip_count(),
                line2: line + right.skip_count(),
                source1: left.name().to_string(),
                source2: right.name().to_string(),
                text1: text1.to_string(),
                text2: text2.to_string(),
                marker: marker_line(text1, text2),
                context: context.to_vec(),
            };
            debug!(
                line,
                line1 = report.line1,
                line2 = report.line2,
                "sources diverge"
            );
            return Ok(Verdict::Mismatch(report));
        }

        debug!(compared = line, "sources match");
        Ok(Verdict::Match { compared: line })
    }

    /// Compare two in-memory line sources
    pub fn compare_lines<L, R>(
        &self,
        left: LineSource<L>,
        right: LineSource<R>,
    ) -> Result<(), MismatchReport>
    where
        L: Iterator,
        L::Item: AsRef<str>,
        R: Iterator,
        R::Item: AsRef<str>,
    {
        let left = left.map_lines(Ok::<L::Item, Infallible>);
        let right = right.map_lines(Ok::<R::Item, Infallible>);
        match self.compare(left, right) {
            Ok(verdict) => verdict.into_result(),
            Err(never) => match never {},
        }
    }
}
