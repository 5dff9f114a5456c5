use super::Reader;
use crate::ParseError;
use thiserror::Error;

#[doc = r#"
An error produced while reading MIDI data, tagged with the byte offset at
which the read failed.
"#]
#[derive(Debug, Error)]
#[error("reading at position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce.
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The bytes read do not form a valid MIDI structure.
    #[error("parsing {0}")]
    Parse(#[from] ParseError),
    /// A read was requested past the end of the buffer.
    #[error("read out of bounds")]
    OutOfBounds,
}

impl ReaderError {
    /// Create a reader error from a position and kind.
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// True if the error was a read past the end of the buffer, the usual
    /// sign of a truncated file.
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Returns the byte offset where the read failed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new parse error at the given position.
    pub const fn parse_error(position: usize, error: ParseError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Parse(error),
        }
    }

    /// Create a new out of bounds error.
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }
}

/// The result type returned by all reading operations.
pub type ReadResult<T> = Result<T, ReaderError>;

pub(crate) fn inv_data(reader: &Reader<'_>, v: impl Into<ParseError>) -> ReaderError {
    ReaderError::parse_error(reader.position(), v.into())
}
