use std::fmt;

use thiserror::Error;

/// What went wrong while decoding, independent of where.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeErrorKind {
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("count overflow: {count} elements of at least {min_size} bytes exceed {remaining} remaining bytes")]
    CountOverflow {
        count: u64,
        min_size: usize,
        remaining: usize,
    },

    #[error("unsupported version {version} (supported range {min}..={max})")]
    UnsupportedVersion { version: u32, min: u32, max: u32 },
}

/// One step of a record path, e.g. `Timing Point #3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub record: &'static str,
    pub index: usize,
}

/// Location of a failure inside nested records, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPath(Vec<PathSegment>);

impl RecordPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{} #{}", segment.record, segment.index)?;
        }
        Ok(())
    }
}

/// A decode failure with the byte offset where the failing read started and
/// the record path leading to it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
    pub path: RecordPath,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset,
            path: RecordPath::default(),
        }
    }

    pub fn truncated(offset: usize, needed: usize, remaining: usize) -> Self {
        Self::new(DecodeErrorKind::TruncatedInput { needed, remaining }, offset)
    }

    pub fn invalid(offset: usize, message: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::InvalidEncoding(message.into()), offset)
    }

    /// Prefixes the path with the enclosing record.
    ///
    /// Errors propagate innermost-out, so each enclosing decoder inserts its
    /// own segment at the front.
    pub fn within(mut self, record: &'static str, index: usize) -> Self {
        self.path.0.insert(0, PathSegment { record, index });
        self
    }
}

// Written by hand: the path part is left out when the path is empty, which a
// single `#[error]` format string cannot express.
impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "at byte {}: {}", self.offset, self.kind)
        } else {
            write!(f, "at byte {} ({}): {}", self.offset, self.path, self.kind)
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Decode error {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    /// Returns the decode failure kind.
    pub fn kind(&self) -> &DecodeErrorKind {
        match self {
            Error::Decode(e) => &e.kind,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            Error::Decode(e) => e.offset,
        }
    }

    pub fn path(&self) -> &RecordPath {
        match self {
            Error::Decode(e) => &e.path,
        }
    }

    pub(crate) fn within(self, record: &'static str, index: usize) -> Self {
        match self {
            Error::Decode(e) => Error::Decode(e.within(record, index)),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
