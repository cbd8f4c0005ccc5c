//! Line sources: `path[:skip]` specifiers, opening, and skip handling

use flate2::read::MultiGzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("malformed source `{spec}`: {reason}")]
    MalformedSpec { spec: String, reason: &'static str },
    #[error("cannot skip {requested} lines of {name}: it only has {available}")]
    SkipOutOfRange {
        name: String,
        requested: usize,
        available: usize,
    },
    #[error("failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {name}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Broad class of a [`SourceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The run was set up wrong (bad specifier, skip past the end)
    Configuration,
    /// The underlying file or stream could not be opened or read
    SourceAccess,
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::MalformedSpec { .. } | SourceError::SkipOutOfRange { .. } => {
                ErrorKind::Configuration
            }
            SourceError::Open { .. } | SourceError::Read { .. } => ErrorKind::SourceAccess,
        }
    }
}

/// A parsed `path[:skip]` source specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub path: PathBuf,
    /// Number of leading lines to discard before comparing
    pub skip: usize,
}

impl SourceSpec {
    pub fn new(path: impl Into<PathBuf>, skip: usize) -> Self {
        Self {
            path: path.into(),
            skip,
        }
    }

    /// `-` reads from standard input
    pub fn is_stdin(&self) -> bool {
        self.path == Path::new("-")
    }

    /// Whether the path names gzip-compressed content
    pub fn is_gzip(&self) -> bool {
        self.path.extension().is_some_and(|ext| ext == "gz")
    }

    /// Name used when labelling lines from this source
    pub fn name(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

impl FromStr for SourceSpec {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &'static str| SourceError::MalformedSpec {
            spec: s.to_string(),
            reason,
        };

        let (path, skip) = match s.rsplit_once(':') {
            None => (s, 0),
            Some((_, "")) => return Err(malformed("missing skip count after `:`")),
            Some((path, count)) => {
                let skip = count
                    .parse::<usize>()
                    .map_err(|_| malformed("skip count must be a non-negative integer"))?;
                (path, skip)
            }
        };

        if path.is_empty() {
            return Err(malformed("missing path"));
        }

        Ok(Self::new(path, skip))
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skip == 0 {
            write!(f, "{}", self.path.display())
        } else {
            write!(f, "{}:{}", self.path.display(), self.skip)
        }
    }
}

/// A lazy, forward-only sequence of lines that has already been advanced
/// past `skip` leading lines.
pub struct LineSource<I> {
    name: String,
    skip: usize,
    lines: I,
}

impl<I> LineSource<I> {
    /// Wrap an iterator that is already positioned after `skip` lines
    pub fn new(name: impl Into<String>, skip: usize, lines: I) -> Self {
        Self {
            name: name.into(),
            skip,
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines discarded before the first line this source yields
    pub fn skip_count(&self) -> usize {
        self.skip
    }

    pub(crate) fn map_lines<F, T>(self, f: F) -> LineSource<std::iter::Map<I, F>>
    where
        I: Iterator,
        F: FnMut(I::Item) -> T,
    {
        LineSource {
            name: self.name,
            skip: self.skip,
            lines: self.lines.map(f),
        }
    }
}

impl<I, T> LineSource<I>
where
    I: Iterator<Item = Result<T, SourceError>>,
{
    /// Consume `skip` lines from `lines` up front.
    ///
    /// Fails with [`SourceError::SkipOutOfRange`] if the input ends first, so a
    /// bad offset is reported before any comparison happens.
    pub fn skipping(
        name: impl Into<String>,
        skip: usize,
        mut lines: I,
    ) -> Result<Self, SourceError> {
        let name = name.into();
        for available in 0..skip {
            match lines.next() {
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err),
                None => {
                    return Err(SourceError::SkipOutOfRange {
                        name,
                        requested: skip,
                        available,
                    })
                }
            }
        }
        debug!(source = %name, skip, "skipped leading lines");
        Ok(Self::new(name, skip, lines))
    }
}

impl<I> fmt::Debug for LineSource<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSource")
            .field("name", &self.name)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

impl<I: Iterator> Iterator for LineSource<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

/// Lines read from a byte stream, with `\n` / `\r\n` terminators removed.
///
/// A line that is not valid UTF-8 is a read error. The iterator ends after
/// the first read error.
pub struct Lines<R> {
    reader: R,
    name: String,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                match String::from_utf8(std::mem::take(&mut self.buf)) {
                    Ok(line) => Some(Ok(line)),
                    Err(err) => {
                        self.done = true;
                        Some(Err(SourceError::Read {
                            name: self.name.clone(),
                            source: io::Error::new(io::ErrorKind::InvalidData, err.utf8_error()),
                        }))
                    }
                }
            }
            Err(source) => {
                self.done = true;
                Some(Err(SourceError::Read {
                    name: self.name.clone(),
                    source,
                }))
            }
        }
    }
}

/// A source opened from a file, a gzip file, or stdin
pub type FileSource = LineSource<Lines<Box<dyn BufRead>>>;

/// Open the source named by `spec` and discard its skipped lines
pub fn open(spec: &SourceSpec) -> Result<FileSource, SourceError> {
    let name = spec.name();
    debug!(%spec, "opening source");

    let reader: Box<dyn BufRead> = if spec.is_stdin() {
        debug!("reading from stdin");
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&spec.path).map_err(|source| SourceError::Open {
            path: spec.path.clone(),
            source,
        })?;
        if spec.is_gzip() {
            debug!(source = %name, "decompressing gzip source");
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            debug!(source = %name, "opened plain source");
            Box::new(BufReader::new(file))
        }
    };

    let lines = Lines::new(reader, name.clone());
    LineSource::skipping(name, spec.skip, lines)
}
