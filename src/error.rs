use thiserror::Error;

#[doc = r#"
A set of errors that can occur while interpreting MIDI data.

These are content errors: the bytes were read successfully but do not form a
valid MIDI structure. Out-of-bounds reads are reported separately by
[`ReaderErrorKind::OutOfBounds`](crate::reader::ReaderErrorKind::OutOfBounds).
"#]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A chunk did not have the expected shape
    #[error("{0}")]
    Chunk(#[from] ChunkError),
    /// A data-shaped byte appeared where a status byte was expected, with no
    /// running status active to fall back on.
    #[error("status byte {status:#04x} has a clear leading bit and no running status is active")]
    UnknownEventCode {
        /// The offending byte
        status: u8,
    },
    /// The header declared an unknown format code.
    #[error("unknown format code {0}")]
    Format(u16),
    /// A data byte had its leading bit set.
    #[error("expected a 7-bit data byte, got {0:#04x}")]
    DataByte(u8),
}

/// A kind of error produced when a chunk tag or chunk header is malformed.
///
/// These are always fatal: once a tag mismatches there is no reliable way to
/// find the next chunk boundary.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// The file did not begin with an `MThd` tag.
    #[error("expected an MThd tag, found {found:?}")]
    InvalidHeaderTag {
        /// The four bytes found instead
        found: [u8; 4],
    },
    /// A track chunk did not begin with an `MTrk` tag.
    #[error("expected an MTrk tag, found {found:?}")]
    InvalidTrackTag {
        /// The four bytes found instead
        found: [u8; 4],
    },
    /// The header chunk must declare exactly six bytes of payload.
    #[error("header chunk declared {0} bytes, expected 6")]
    InvalidHeaderLength(u32),
}
