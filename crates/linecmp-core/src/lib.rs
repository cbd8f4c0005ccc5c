//! linecmp Core - first-divergence log comparison
//!
//! This library pairs up the lines of two logs, stops at the first pair that
//! differs, and describes that point with preceding context and a column
//! marker.

pub mod compare;
pub mod context;
pub mod report;
pub mod source;

pub use compare::{LineComparator, Verdict};
pub use context::ContextBuffer;
pub use report::{marker_line, MismatchReport};
pub use source::{open, ErrorKind, FileSource, LineSource, Lines, SourceError, SourceSpec};
