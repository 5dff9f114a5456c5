use core::fmt;

use crate::ParseError;

#[doc = r#"
A validated 7-bit MIDI data byte.

Data bytes always have a clear leading bit, which is what distinguishes them
from status bytes on the wire. Values range from 0 to 127.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Create a new data byte, checking for a clear leading bit.
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        if byte > 127 {
            return Err(ParseError::DataByte(byte));
        }
        Ok(Self(byte))
    }

    /// Create a new data byte without checking the leading bit.
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    /// Returns the underlying byte.
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ParseError;
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::new(byte)
    }
}

impl From<DataByte> for u8 {
    fn from(byte: DataByte) -> Self {
        byte.0
    }
}

impl fmt::Display for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[test]
fn data_byte_bounds() {
    assert_eq!(DataByte::new(0).unwrap().value(), 0);
    assert_eq!(DataByte::new(127).unwrap().value(), 127);
    assert_eq!(DataByte::new(128), Err(ParseError::DataByte(128)));
    assert_eq!(DataByte::new(255), Err(ParseError::DataByte(255)));
}
