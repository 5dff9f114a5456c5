use alloc::{format, string::String};

use crate::song::TrackEvent;

#[doc = r#"
An animation event: one note of the song, stamped with its absolute start
time and resolved duration.

Unlike a [`TrackEvent`], an `AnimEvent` is self-contained. Its start time is
measured in microseconds from the start of the song rather than ticks from
the previous event, and a paired note-on/note-off has already been collapsed
into one event with a length. Records never change once built; resolving a
note's length replaces its placeholder with a new record.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimEvent {
    event: TrackEvent,
    track: usize,
    start_micros: u64,
    length_micros: u64,
    micros_per_beat: u32,
    id: String,
}

impl AnimEvent {
    /// Create a zero-length animation event for a track event at an
    /// absolute time. The length of a note is resolved later via
    /// [`AnimEvent::with_length`], once its note-off arrives.
    pub fn new(track: usize, event: TrackEvent, start_micros: u64, micros_per_beat: u32) -> Self {
        // Renderers match events across frames by id: a note keeps one
        // visual element alive for its whole lifespan.
        let id = match event.note_number() {
            Some(note) => format!("{track}-{note}"),
            None => format!("{track}-{start_micros}"),
        };
        Self {
            event,
            track,
            start_micros,
            length_micros: 0,
            micros_per_beat,
            id,
        }
    }

    /// Returns a copy of this event with its length resolved.
    pub fn with_length(&self, length_micros: u64) -> Self {
        Self {
            length_micros,
            ..self.clone()
        }
    }

    /// The originating track event.
    pub const fn event(&self) -> &TrackEvent {
        &self.event
    }

    /// The index of the track the event came from.
    pub const fn track(&self) -> usize {
        self.track
    }

    /// Microseconds from the start of the song.
    pub const fn start_micros(&self) -> u64 {
        self.start_micros
    }

    /// The duration of the note in microseconds. Zero for events that are
    /// not paired notes.
    pub const fn length_micros(&self) -> u64 {
        self.length_micros
    }

    /// The tempo in effect when the event fires.
    pub const fn micros_per_beat(&self) -> u32 {
        self.micros_per_beat
    }

    /// An identity for render-side element matching.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The millisecond bucket this event belongs to.
    pub const fn bucket(&self) -> u64 {
        self.start_micros / 1000
    }
}
