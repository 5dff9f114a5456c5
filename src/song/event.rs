use alloc::vec::Vec;

use crate::{
    DataByte, ParseError,
    reader::{ReadResult, Reader, inv_data},
    song::MetaEvent,
};

#[doc = r#"
One event of a track: a delta time, the status byte in effect, and the
decoded message.

`status` is the status byte that was actually used to decode the event. For
a running-status event that is the previous event's status, not the byte at
the event's position in the file (which was data).
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    delta: u32,
    status: u8,
    message: TrackMessage,
}

impl TrackEvent {
    /// Create an event from its parts.
    pub const fn new(delta: u32, status: u8, message: TrackMessage) -> Self {
        Self {
            delta,
            status,
            message,
        }
    }

    /// Ticks since the previous event in the same track.
    pub const fn delta(&self) -> u32 {
        self.delta
    }

    /// The status byte in effect for this event.
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// The decoded message.
    pub const fn message(&self) -> &TrackMessage {
        &self.message
    }

    /// The channel this event addresses, for channel voice messages.
    pub const fn channel(&self) -> Option<u8> {
        match self.message {
            TrackMessage::ChannelVoice(_) => Some(self.status & 0x0F),
            _ => None,
        }
    }

    /// True for note-on and note-off events.
    pub const fn is_note(&self) -> bool {
        matches!(
            self.message,
            TrackMessage::ChannelVoice(VoiceEvent::NoteOn { .. } | VoiceEvent::NoteOff { .. })
        )
    }

    /// The pitch of a note-on or note-off event.
    pub const fn note_number(&self) -> Option<u8> {
        match self.message {
            TrackMessage::ChannelVoice(
                VoiceEvent::NoteOn { note, .. } | VoiceEvent::NoteOff { note, .. },
            ) => Some(note.value()),
            _ => None,
        }
    }

    /// Decode one event. The cursor is at the event's status byte (or first
    /// data byte, in the running-status case); the delta time has already
    /// been read.
    ///
    /// `running_status` is shared between consecutive calls for one track.
    /// Channel voice statuses update it, meta and system exclusive statuses
    /// clear it.
    pub(crate) fn read(
        reader: &mut Reader<'_>,
        delta: u32,
        running_status: &mut Option<u8>,
    ) -> ReadResult<Self> {
        let byte = reader.next_byte()?;
        let status = if byte & 0x80 == 0 {
            // Data-shaped byte: the status was elided, so this is the first
            // data byte of a repeat of the previous event type. Unread it
            // and decode under the running status.
            reader.push_byte();
            match *running_status {
                Some(status) => status,
                None => {
                    return Err(inv_data(
                        reader,
                        ParseError::UnknownEventCode { status: byte },
                    ));
                }
            }
        } else {
            byte
        };

        let message = match status {
            0xFF => {
                *running_status = None;
                TrackMessage::Meta(MetaEvent::read(reader)?)
            }
            0xF0..=0xFE => {
                *running_status = None;
                let length = reader.read_varlen()? as usize;
                TrackMessage::SystemExclusive(reader.get_bytes(length)?.to_vec())
            }
            _ => {
                *running_status = Some(status);
                TrackMessage::ChannelVoice(VoiceEvent::read(status, reader)?)
            }
        };

        Ok(Self {
            delta,
            status,
            message,
        })
    }
}

#[doc = r#"
The set of possible track messages.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage {
    /// A message addressed to a MIDI channel, carrying the musical data
    ChannelVoice(VoiceEvent),
    /// A meta event carrying track-level information
    Meta(MetaEvent),
    /// A system exclusive message, kept as its raw payload
    SystemExclusive(Vec<u8>),
}

#[doc = r#"
A channel voice message.

Note events carry the musical content this crate exists for. The remaining
variants are decoded structurally so the stream stays aligned, and are kept
in the document for completeness, but nothing downstream interprets them.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Stop playing a note
    NoteOff {
        /// The pitch to release
        note: DataByte,
        /// The release velocity
        velocity: DataByte,
    },
    /// Start playing a note.
    ///
    /// A velocity of zero is kept as a literal note-on here, even though
    /// some encoders emit it in place of a note-off.
    NoteOn {
        /// The pitch to press
        note: DataByte,
        /// The strength of the press
        velocity: DataByte,
    },
    /// Change the pressure on a held note
    PolyAftertouch {
        /// The held pitch
        note: DataByte,
        /// The new pressure
        pressure: DataByte,
    },
    /// Change a controller value
    ControlChange {
        /// The controller number
        controller: DataByte,
        /// The value to set it to
        value: DataByte,
    },
    /// Change the instrument for the channel
    ProgramChange {
        /// The program number
        program: DataByte,
    },
    /// Change the pressure of the whole channel
    ChannelAftertouch {
        /// The new pressure
        pressure: DataByte,
    },
    /// Bend the pitch of the whole channel
    PitchWheel {
        /// Low 7 bits of the bend value
        lsb: DataByte,
        /// High 7 bits of the bend value
        msb: DataByte,
    },
}

impl VoiceEvent {
    /// Decode the data bytes of a channel voice message. The caller has
    /// already established that `status` is in `0x80..=0xEF`.
    pub(crate) fn read(status: u8, reader: &mut Reader<'_>) -> ReadResult<Self> {
        Ok(match status & 0xF0 {
            0x80 => Self::NoteOff {
                note: data_byte(reader)?,
                velocity: data_byte(reader)?,
            },
            0x90 => Self::NoteOn {
                note: data_byte(reader)?,
                velocity: data_byte(reader)?,
            },
            0xA0 => Self::PolyAftertouch {
                note: data_byte(reader)?,
                pressure: data_byte(reader)?,
            },
            0xB0 => Self::ControlChange {
                controller: data_byte(reader)?,
                value: data_byte(reader)?,
            },
            0xC0 => Self::ProgramChange {
                program: data_byte(reader)?,
            },
            0xD0 => Self::ChannelAftertouch {
                pressure: data_byte(reader)?,
            },
            _ => Self::PitchWheel {
                lsb: data_byte(reader)?,
                msb: data_byte(reader)?,
            },
        })
    }
}

fn data_byte(reader: &mut Reader<'_>) -> ReadResult<DataByte> {
    let byte = reader.next_byte()?;
    DataByte::new(byte).map_err(|e| inv_data(reader, e))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reader::ReaderErrorKind;
    use pretty_assertions::assert_eq;

    fn read_one(bytes: &[u8], running_status: &mut Option<u8>) -> ReadResult<TrackEvent> {
        let mut reader = Reader::from_byte_slice(bytes);
        TrackEvent::read(&mut reader, 0, running_status)
    }

    #[test]
    fn note_on_decodes() {
        let event = read_one(&[0x93, 60, 100], &mut None).unwrap();
        assert_eq!(event.status(), 0x93);
        assert_eq!(event.channel(), Some(3));
        assert!(event.is_note());
        assert_eq!(event.note_number(), Some(60));
        assert_eq!(
            event.message(),
            &TrackMessage::ChannelVoice(VoiceEvent::NoteOn {
                note: DataByte::new_unchecked(60),
                velocity: DataByte::new_unchecked(100),
            })
        );
    }

    #[test]
    fn running_status_reuses_previous_status() {
        let bytes = [0x90, 60, 100, 64, 100];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut running_status = None;

        let first = TrackEvent::read(&mut reader, 0, &mut running_status).unwrap();
        assert_eq!(first.status(), 0x90);
        assert_eq!(running_status, Some(0x90));

        let second = TrackEvent::read(&mut reader, 0, &mut running_status).unwrap();
        assert_eq!(second.status(), 0x90);
        assert_eq!(second.note_number(), Some(64));
        assert!(reader.is_eof());
    }

    #[test]
    fn running_status_without_context_is_fatal() {
        let err = read_one(&[60, 100], &mut None).unwrap_err();
        assert!(matches!(
            err.kind(),
            ReaderErrorKind::Parse(ParseError::UnknownEventCode { status: 60 })
        ));
    }

    #[test]
    fn meta_clears_running_status() {
        let mut running_status = Some(0x90);
        let event = read_one(&[0xFF, 0x2F, 0x00], &mut running_status).unwrap();
        assert_eq!(event.message(), &TrackMessage::Meta(MetaEvent::EndOfTrack));
        assert_eq!(running_status, None);
    }

    #[test]
    fn sysex_consumes_declared_length() {
        let mut running_status = Some(0x90);
        let bytes = [0xF0, 0x04, 0x43, 0x12, 0x00, 0xF7];
        let mut reader = Reader::from_byte_slice(&bytes);
        let event = TrackEvent::read(&mut reader, 0, &mut running_status).unwrap();
        assert_eq!(
            event.message(),
            &TrackMessage::SystemExclusive(alloc::vec![0x43, 0x12, 0x00, 0xF7])
        );
        assert_eq!(running_status, None);
        assert!(reader.is_eof());
    }

    #[test]
    fn single_data_byte_messages_stay_aligned() {
        // program change then channel aftertouch, back to back
        let bytes = [0xC1, 0x05, 0xD1, 0x40];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut running_status = None;

        let program = TrackEvent::read(&mut reader, 0, &mut running_status).unwrap();
        assert_eq!(
            program.message(),
            &TrackMessage::ChannelVoice(VoiceEvent::ProgramChange {
                program: DataByte::new_unchecked(5)
            })
        );

        let pressure = TrackEvent::read(&mut reader, 0, &mut running_status).unwrap();
        assert_eq!(
            pressure.message(),
            &TrackMessage::ChannelVoice(VoiceEvent::ChannelAftertouch {
                pressure: DataByte::new_unchecked(0x40)
            })
        );
        assert!(reader.is_eof());
    }

    #[test]
    fn pitch_wheel_reads_lsb_then_msb() {
        let event = read_one(&[0xE0, 0x00, 0x40], &mut None).unwrap();
        assert_eq!(
            event.message(),
            &TrackMessage::ChannelVoice(VoiceEvent::PitchWheel {
                lsb: DataByte::new_unchecked(0x00),
                msb: DataByte::new_unchecked(0x40),
            })
        );
    }

    #[test]
    fn status_shaped_data_byte_is_rejected() {
        let err = read_one(&[0x90, 60, 0x85], &mut None).unwrap_err();
        assert!(matches!(
            err.kind(),
            ReaderErrorKind::Parse(ParseError::DataByte(0x85))
        ));
    }
}
