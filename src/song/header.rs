use crate::{
    ChunkError, ParseError,
    reader::{ReadResult, Reader, inv_data},
    song::{Division, FormatType},
};

#[doc = r#"
The decoded header chunk of a MIDI file.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: FormatType,
    track_count: u16,
    division: Division,
}

impl Header {
    /// Create a header from its parts.
    pub const fn new(format: FormatType, track_count: u16, division: Division) -> Self {
        Self {
            format,
            track_count,
            division,
        }
    }

    /// Parse the `MThd` chunk. The cursor is at the start of the file.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let tag: [u8; 4] = reader.read_exact()?;
        if &tag != b"MThd" {
            return Err(inv_data(reader, ChunkError::InvalidHeaderTag { found: tag }));
        }

        let length = u32::from_be_bytes(reader.read_exact()?);
        if length != 6 {
            return Err(inv_data(reader, ChunkError::InvalidHeaderLength(length)));
        }

        let raw_format = u16::from_be_bytes(reader.read_exact()?);
        let format = FormatType::try_from(raw_format)
            .map_err(|e| inv_data(reader, ParseError::Format(e.number)))?;
        let track_count = u16::from_be_bytes(reader.read_exact()?);
        let division = Division::read(reader)?;

        Ok(Self {
            format,
            track_count,
            division,
        })
    }

    /// Returns the format type for the file.
    pub const fn format(&self) -> FormatType {
        self.format
    }

    /// The number of track chunks the header declares.
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// The time division for the file's delta times.
    pub const fn division(&self) -> &Division {
        &self.division
    }
}
