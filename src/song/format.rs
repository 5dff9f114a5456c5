use num_enum::TryFromPrimitive;

#[doc = r#"
The format code declared by the header chunk.

The code determines how the file's tracks relate to each other:

- Format 0 stores one track carrying every channel.
- Format 1 stores several tracks meant to play simultaneously.
- Format 2 stores several independent single-track patterns.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

impl FormatType {
    /// Returns the raw format code.
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

#[test]
fn format_codes() {
    assert_eq!(
        FormatType::try_from(0u16).unwrap(),
        FormatType::SingleMultiChannel
    );
    assert_eq!(FormatType::try_from(1u16).unwrap(), FormatType::Simultaneous);
    assert_eq!(
        FormatType::try_from(2u16).unwrap(),
        FormatType::SequentiallyIndependent
    );
    assert!(FormatType::try_from(3u16).is_err());
    assert_eq!(FormatType::Simultaneous.code(), 1);
}
