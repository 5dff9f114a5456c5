#![doc = r#"
# Overview

`midiviz` parses Standard MIDI Files into a [`Song`](song::Song) document and
transforms that document into a [`Timeline`](timeline::Timeline): a
millisecond-bucketed map of [`AnimEvent`](timeline::AnimEvent)s, each carrying
the absolute start time and resolved duration of a note. Renderers drive
animations straight off the timeline while the audio plays.

```rust
use midiviz::prelude::*;

# fn demo(bytes: &[u8]) -> Result<(), midiviz::reader::ReaderError> {
let song = Song::parse(bytes)?;
let timeline = song.to_timeline();

for ms in timeline.event_times() {
    for event in timeline.events_at(ms) {
        println!("{}: note lasts {}us", event.id(), event.length_micros());
    }
}
# Ok(())
# }
```

Parsing is a synchronous pass over an in-memory byte slice. The resulting
`Song` owns all of its data, so the input buffer can be dropped as soon as
[`Song::parse`](song::Song::parse) returns.

# About features

- `std` (default): integrates the error types with the standard library.
  Disabling it makes the crate `no_std + alloc`.
- `tracing`: emits [`tracing`] diagnostics for recoverable anomalies, such as
  a note-off with no matching note-on or a track chunk whose events overrun
  its declared length.
- `serde`: derives `Serialize`/`Deserialize` for the document and timeline
  types.
"#]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bytes;
pub use bytes::*;

mod error;
pub use error::*;

/// Byte-level reading primitives for the MIDI wire format.
pub mod reader;

/// The parsed [`Song`](song::Song) document and its building blocks.
pub mod song;

/// The derived [`Timeline`](timeline::Timeline) and its animation events.
pub mod timeline;

#[doc = r#"
Commonly used types, re-exported in one place.
"#]
pub mod prelude {
    pub use crate::{
        ChunkError, DataByte, ParseError,
        reader::{ReadResult, Reader},
        song::{
            Division, FormatType, Header, MetaEvent, SmpteFps, Song, Tempo, TimeSignature, Track,
            TrackEvent, TrackMessage, VoiceEvent,
        },
        timeline::{AnimEvent, Timeline},
    };
}
