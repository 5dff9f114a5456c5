#![doc = r#"
Rusty representation of a parsed MIDI file.

[`Song`] is the root document: the decoded header plus every track's events,
in file order. It owns all of its data; the raw byte buffer can be dropped
as soon as [`Song::parse`] returns.
"#]

mod division;
pub use division::*;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod event;
pub use event::*;

mod meta;
pub use meta::*;

mod track;
pub use track::*;

use alloc::{collections::BTreeSet, vec::Vec};

use crate::{
    reader::{ReadResult, Reader},
    timeline::Timeline,
};

#[doc = r#"
A parsed MIDI file: header plus tracks. Read-only once built.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    header: Header,
    tracks: Vec<Track>,
}

impl Song {
    /// Parse a set of bytes into a song document.
    ///
    /// Malformed chunk tags, unknown status bytes and other structural
    /// errors abort the parse. A stream that simply ends before the
    /// declared track count is reached is tolerated: the tracks parsed so
    /// far are returned.
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = Header::read(&mut reader)?;

        let mut tracks = Vec::with_capacity(usize::from(header.track_count()));
        for _ in 0..header.track_count() {
            if reader.is_eof() {
                break;
            }
            match Track::read(&mut reader) {
                Ok(track) => tracks.push(track),
                Err(e) if e.is_out_of_bounds() => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        "stream ended mid-track at position {}, keeping {} parsed tracks",
                        e.position(),
                        tracks.len()
                    );
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Self { header, tracks })
    }

    /// Returns header info.
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the track list.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Transform the song into a millisecond-bucketed animation timeline.
    pub fn to_timeline(&self) -> Timeline {
        Timeline::from_song(self)
    }

    /// The sorted distinct tick offsets at which any track has an event.
    pub fn event_times(&self) -> Vec<u64> {
        let mut times = BTreeSet::new();
        for track in &self.tracks {
            let mut elapsed: u64 = 0;
            for event in track.events() {
                elapsed += u64::from(event.delta());
                times.insert(elapsed);
            }
        }
        times.into_iter().collect()
    }

    /// The events of every track whose accumulated tick offset is exactly
    /// `ticks`, in track order.
    pub fn events_at_time(&self, ticks: u64) -> Vec<&TrackEvent> {
        let mut found = Vec::new();
        for track in &self.tracks {
            let mut elapsed: u64 = 0;
            for event in track.events() {
                elapsed += u64::from(event.delta());
                if elapsed == ticks {
                    found.push(event);
                } else if elapsed > ticks {
                    break;
                }
            }
        }
        found
    }

    /// The events of every track whose accumulated tick offset falls in
    /// `start..end`, ascending by time, ties broken by track order.
    pub fn events_between_times(&self, start: u64, end: u64) -> Vec<&TrackEvent> {
        let mut found = Vec::new();
        for (track_index, track) in self.tracks.iter().enumerate() {
            let mut elapsed: u64 = 0;
            for event in track.events() {
                elapsed += u64::from(event.delta());
                if elapsed >= end {
                    break;
                }
                if elapsed >= start {
                    found.push((elapsed, track_index, event));
                }
            }
        }
        found.sort_by_key(|(elapsed, track_index, _)| (*elapsed, *track_index));
        found.into_iter().map(|(_, _, event)| event).collect()
    }
}
