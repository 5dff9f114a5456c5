#![doc = r#"
Transforms a [`Song`](crate::song::Song) into a render-ready timeline.

The parser leaves time relative (ticks since the previous event) and notes
split across two events. Renderers want the opposite: absolute wall-clock
offsets and whole notes with durations. [`Timeline::from_song`] performs
that reduction in one pass per track:

- delta ticks are scaled to microseconds under the tempo in effect,
  tracking tempo meta events as they rescale the time base mid-stream;
- each note-on opens a pending note and a zero-length placeholder in the
  map; the matching note-off resolves the placeholder in place, so a note's
  full duration is visible at its *start* time;
- everything is bucketed by millisecond across all tracks, which is the
  granularity animation frames are scheduled at.

A note-off with no matching note-on is skipped (with a diagnostic under the
`tracing` feature); one bad note does not invalidate the rest of the song.
"#]

mod event;
pub use event::*;

use alloc::{collections::BTreeMap, vec::Vec};

use crate::song::{MetaEvent, Song, Tempo, TrackMessage, VoiceEvent};

/// Where a pending note's placeholder sits, and when the note started.
struct PendingNote {
    bucket: u64,
    index: usize,
    start_micros: f64,
}

#[doc = r#"
A song reduced to absolute time: animation events bucketed by millisecond.

Buckets are keyed by whole milliseconds from the start of the song. Within
one bucket, events appear in track order, then event order. The timeline is
independent of the [`Song`](crate::song::Song) it was derived from.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    buckets: BTreeMap<u64, Vec<AnimEvent>>,
}

impl Timeline {
    /// Reduce a song to a timeline.
    ///
    /// Tracks are processed independently and merged into one shared map;
    /// each track starts at the default tempo until its own tempo events
    /// say otherwise.
    pub fn from_song(song: &Song) -> Self {
        let mut timeline = Self::default();
        for track_index in 0..song.tracks().len() {
            timeline.reduce_track(song, track_index);
        }
        timeline
    }

    fn reduce_track(&mut self, song: &Song, track_index: usize) {
        let division = song.header().division();
        let track = &song.tracks()[track_index];

        let mut micros_per_beat = Tempo::default().micros_per_beat();
        let mut micros_per_tick = division.micros_per_tick(micros_per_beat);
        let mut elapsed_micros: f64 = 0.;
        let mut active: BTreeMap<u8, Vec<PendingNote>> = BTreeMap::new();

        for event in track.events() {
            if let TrackMessage::Meta(MetaEvent::Tempo(tempo)) = event.message() {
                // Tempo changes rescale the tick length from here on. Their
                // own delta does not advance the clock.
                micros_per_beat = tempo.micros_per_beat();
                micros_per_tick = division.micros_per_tick(micros_per_beat);
                continue;
            }

            elapsed_micros += f64::from(event.delta()) * micros_per_tick;

            match event.message() {
                TrackMessage::ChannelVoice(VoiceEvent::NoteOn { note, .. }) => {
                    let anim = AnimEvent::new(
                        track_index,
                        event.clone(),
                        elapsed_micros as u64,
                        micros_per_beat,
                    );
                    let bucket = anim.bucket();
                    let slot = self.buckets.entry(bucket).or_default();
                    let index = slot.len();
                    slot.push(anim);
                    active.entry(note.value()).or_default().push(PendingNote {
                        bucket,
                        index,
                        start_micros: elapsed_micros,
                    });
                }
                TrackMessage::ChannelVoice(VoiceEvent::NoteOff { note, .. }) => {
                    let Some(pending) = active.get_mut(&note.value()).and_then(Vec::pop) else {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            "note off for pitch {} on track {track_index} has no matching note on",
                            note.value()
                        );
                        continue;
                    };
                    let length = (elapsed_micros - pending.start_micros) as u64;
                    // Resolve the placeholder in its original slot so the
                    // duration is visible at the note's start bucket.
                    if let Some(slot) = self
                        .buckets
                        .get_mut(&pending.bucket)
                        .and_then(|events| events.get_mut(pending.index))
                    {
                        *slot = slot.with_length(length);
                    }
                }
                // Other events advance the clock but produce nothing.
                _ => {}
            }
        }
    }

    /// True if the timeline holds no events.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The sorted distinct millisecond buckets holding at least one event.
    pub fn event_times(&self) -> Vec<u64> {
        self.buckets.keys().copied().collect()
    }

    /// The events at exactly bucket `ms`, or an empty slice.
    pub fn events_at(&self, ms: u64) -> &[AnimEvent] {
        self.buckets.get(&ms).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every event in buckets `start..end`, ascending by bucket.
    pub fn events_between(&self, start: u64, end: u64) -> Vec<&AnimEvent> {
        if start >= end {
            return Vec::new();
        }
        self.buckets
            .range(start..end)
            .flat_map(|(_, events)| events.iter())
            .collect()
    }

    /// Iterate over the buckets in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[AnimEvent])> {
        self.buckets
            .iter()
            .map(|(ms, events)| (*ms, events.as_slice()))
    }
}
