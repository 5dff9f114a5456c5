use alloc::{string::String, vec::Vec};

use crate::reader::{ReadResult, Reader};

#[doc = r#"
A meta event, carrying information about the track rather than notes.

Tempo, time signature, instrument/track names and the end-of-track marker
are decoded into structured form. Every other meta type is retained as an
[`MetaEvent::Unknown`] with its numeric type byte and raw payload, so the
byte accounting of the surrounding track stays exact either way.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaEvent {
    /// Name of the track (meta type `0x03`)
    TrackName(String),
    /// Name of the instrument playing the track (meta type `0x04`)
    InstrumentName(String),
    /// Obligatory at track end (meta type `0x2F`)
    EndOfTrack,
    /// Microseconds per quarter note (meta type `0x51`)
    Tempo(Tempo),
    /// Time signature (meta type `0x58`)
    TimeSignature(TimeSignature),
    /// Any meta type not interpreted further, kept with its raw payload
    Unknown {
        /// The raw meta type byte
        kind: u8,
        /// The declared payload, uninterpreted
        data: Vec<u8>,
    },
}

impl MetaEvent {
    /// Decode one meta event. The `0xFF` status byte has already been
    /// consumed; the cursor is at the meta type byte.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let kind = reader.next_byte()?;
        let length = reader.read_varlen()? as usize;
        let data = reader.get_bytes(length)?;

        Ok(match kind {
            0x03 => Self::TrackName(latin1(data)),
            0x04 => Self::InstrumentName(latin1(data)),
            0x2F => Self::EndOfTrack,
            0x51 if data.len() >= 3 => {
                Self::Tempo(Tempo::from_bytes([data[0], data[1], data[2]]))
            }
            0x58 if data.len() >= 4 => Self::TimeSignature(TimeSignature::from_bytes([
                data[0], data[1], data[2], data[3],
            ])),
            _ => Self::Unknown {
                kind,
                data: data.to_vec(),
            },
        })
    }
}

// Name metas are Latin-1 in practice; every byte maps to the code point of
// the same value.
fn latin1(data: &[u8]) -> String {
    data.iter().map(|&byte| char::from(byte)).collect()
}

#[doc = r#"
A tempo, measured in microseconds per quarter note.

The default of 500000 (120 beats per minute) applies until the first tempo
meta event of a track.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Tempo {
    /// Create a tempo from a microseconds-per-beat count.
    pub const fn new(micros_per_beat: u32) -> Self {
        Self(micros_per_beat)
    }

    /// Decode the big-endian 24-bit payload of a tempo meta event.
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the number of microseconds per quarter note.
    pub const fn micros_per_beat(&self) -> u32 {
        self.0
    }

    /// Returns the tempo in beats per minute.
    pub fn beats_per_minute(&self) -> f64 {
        60_000_000. / f64::from(self.0)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self(500_000)
    }
}

#[doc = r#"
A time signature meta event.

The raw denominator byte is a power-of-two exponent and is decoded here, so
a 6/8 signature reads back as `numerator: 6, denominator: 8`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per measure
    pub numerator: u8,
    /// Note value of one beat, already decoded from its exponent form
    pub denominator: u16,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Number of notated 32nd notes per quarter note
    pub thirty_seconds_per_beat: u8,
}

impl TimeSignature {
    /// Decode the 4-byte payload of a time signature meta event.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            numerator: bytes[0],
            denominator: 2u16.saturating_pow(u32::from(bytes[1])),
            clocks_per_click: bytes[2],
            thirty_seconds_per_beat: bytes[3],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tempo_from_bytes() {
        let tempo = Tempo::from_bytes([0x07, 0xA1, 0x20]);
        assert_eq!(tempo.micros_per_beat(), 500_000);
        assert_eq!(tempo.beats_per_minute(), 120.);

        let tempo = Tempo::from_bytes([0x0F, 0x42, 0x40]);
        assert_eq!(tempo.micros_per_beat(), 1_000_000);
    }

    #[test]
    fn default_tempo_is_120_bpm() {
        assert_eq!(Tempo::default().micros_per_beat(), 500_000);
    }

    #[test]
    fn time_signature_decodes_exponent() {
        let sig = TimeSignature::from_bytes([6, 3, 24, 8]);
        assert_eq!(sig.numerator, 6);
        assert_eq!(sig.denominator, 8);
        assert_eq!(sig.clocks_per_click, 24);
        assert_eq!(sig.thirty_seconds_per_beat, 8);
    }

    #[test]
    fn meta_read_interprets_known_types() {
        // tempo: FF already consumed, so: 51 03 07 A1 20
        let mut reader = Reader::from_byte_slice(&[0x51, 0x03, 0x07, 0xA1, 0x20]);
        assert_eq!(
            MetaEvent::read(&mut reader).unwrap(),
            MetaEvent::Tempo(Tempo::new(500_000))
        );

        let mut reader = Reader::from_byte_slice(&[0x2F, 0x00]);
        assert_eq!(MetaEvent::read(&mut reader).unwrap(), MetaEvent::EndOfTrack);

        let mut reader = Reader::from_byte_slice(&[0x04, 0x05, b'P', b'i', b'a', b'n', b'o']);
        assert_eq!(
            MetaEvent::read(&mut reader).unwrap(),
            MetaEvent::InstrumentName("Piano".into())
        );
    }

    #[test]
    fn meta_read_keeps_unknown_types_raw() {
        // key signature is not interpreted by this crate
        let mut reader = Reader::from_byte_slice(&[0x59, 0x02, 0x03, 0x00]);
        assert_eq!(
            MetaEvent::read(&mut reader).unwrap(),
            MetaEvent::Unknown {
                kind: 0x59,
                data: alloc::vec![0x03, 0x00],
            }
        );
    }

    #[test]
    fn short_tempo_payload_falls_back_to_unknown() {
        let mut reader = Reader::from_byte_slice(&[0x51, 0x02, 0x07, 0xA1]);
        assert_eq!(
            MetaEvent::read(&mut reader).unwrap(),
            MetaEvent::Unknown {
                kind: 0x51,
                data: alloc::vec![0x07, 0xA1],
            }
        );
    }

    #[test]
    fn latin1_name_decoding() {
        // 0xE9 is é in Latin-1
        let mut reader = Reader::from_byte_slice(&[0x03, 0x04, b'b', b'b', 0xE9, b'e']);
        assert_eq!(
            MetaEvent::read(&mut reader).unwrap(),
            MetaEvent::TrackName("bb\u{e9}e".into())
        );
    }
}
