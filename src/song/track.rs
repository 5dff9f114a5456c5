use alloc::{string::String, vec::Vec};

use crate::{
    ChunkError,
    reader::{ReadResult, Reader, inv_data},
    song::{MetaEvent, TrackEvent, TrackMessage},
};

#[doc = r#"
One track of a [`Song`](crate::song::Song): its events in file order plus
the track-level facts a renderer cares about.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<TrackEvent>,
    has_notes: bool,
    instrument_name: Option<String>,
}

impl Track {
    /// Create a track from a list of events, deriving the track-level
    /// facts from them.
    pub fn new(events: Vec<TrackEvent>) -> Self {
        let mut track = Self {
            events: Vec::new(),
            has_notes: false,
            instrument_name: None,
        };
        for event in events {
            track.push(event);
        }
        track
    }

    /// The events of the track, in file order.
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// True if any note event occurs in the track.
    pub const fn has_notes(&self) -> bool {
        self.has_notes
    }

    /// The instrument name declared by the track, if any.
    pub fn instrument_name(&self) -> Option<&str> {
        self.instrument_name.as_deref()
    }

    fn push(&mut self, event: TrackEvent) {
        match event.message() {
            TrackMessage::ChannelVoice(_) if event.is_note() => self.has_notes = true,
            TrackMessage::Meta(MetaEvent::InstrumentName(name)) => {
                if self.instrument_name.is_none() {
                    self.instrument_name = Some(name.clone());
                }
            }
            _ => {}
        }
        self.events.push(event);
    }

    /// Parse one `MTrk` chunk. The cursor is at the chunk tag.
    ///
    /// Events are decoded until their cumulative size reaches the chunk's
    /// declared byte length. The loop condition is checked between events,
    /// so a malformed final event may overrun the boundary; the mismatch is
    /// reported but the track is still returned.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let tag: [u8; 4] = reader.read_exact()?;
        if &tag != b"MTrk" {
            return Err(inv_data(reader, ChunkError::InvalidTrackTag { found: tag }));
        }
        let declared = u32::from_be_bytes(reader.read_exact()?) as usize;

        let start = reader.position();
        let mut track = Self::default();
        let mut running_status = None;

        while reader.position() - start < declared {
            let delta = reader.read_varlen()?;
            let event = TrackEvent::read(reader, delta, &mut running_status)?;
            track.push(event);
        }

        let consumed = reader.position() - start;
        if consumed != declared {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "track chunk declared {declared} bytes but its events consumed {consumed}"
            );
        }

        Ok(track)
    }
}
