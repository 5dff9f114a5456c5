use crate::reader::{ReadResult, Reader};

#[doc = r#"
The time division declared by the header chunk.

The division defines what one tick of delta time means. Bit 15 of the raw
field selects between the two interpretations:

- Bit 15 clear: the remaining 15 bits are the number of ticks per quarter
  note, and tempo meta events scale ticks to wall-clock time.
- Bit 15 set: the high byte is a negated SMPTE frame rate and the low byte
  is the number of ticks per frame. Tick length is then fixed, independent
  of tempo.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Division {
    /// Delta times count ticks of a quarter note
    TicksPerBeat(TicksPerBeat),
    /// Delta times count subdivisions of an SMPTE frame
    FramesPerSecond(SmpteDivision),
}

impl Division {
    /// Define the division as a tick rate per quarter note.
    ///
    /// The leading bit of the `u16` is disregarded, so 1-32767.
    pub const fn new_ticks_per_beat(tpb: u16) -> Self {
        let msb = (tpb >> 8) as u8 & 0x7F;
        let lsb = (tpb & 0x00FF) as u8;
        Self::TicksPerBeat(TicksPerBeat { inner: [msb, lsb] })
    }

    /// Define the division in terms of fps and ticks per frame.
    pub const fn new_frames_per_second(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::FramesPerSecond(SmpteDivision {
            inner: [fps.as_negated_byte() as u8, ticks_per_frame],
        })
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let bytes: [u8; 2] = reader.read_exact()?;
        // bit 15 set means SMPTE timing
        match bytes[0] >> 7 {
            0 => Ok(Self::TicksPerBeat(TicksPerBeat { inner: bytes })),
            _ => Ok(Self::FramesPerSecond(SmpteDivision { inner: bytes })),
        }
    }

    /// True when delta times are measured in ticks per quarter note.
    pub const fn is_ticks_per_beat(&self) -> bool {
        matches!(self, Self::TicksPerBeat(_))
    }

    /// True when delta times are measured against SMPTE frames.
    ///
    /// Always the opposite of [`Division::is_ticks_per_beat`].
    pub const fn is_frames_per_second(&self) -> bool {
        !self.is_ticks_per_beat()
    }

    /// Returns the tick rate if the division is tempo-based.
    pub const fn ticks_per_beat(&self) -> Option<u16> {
        match self {
            Self::TicksPerBeat(t) => Some(t.ticks_per_beat()),
            Self::FramesPerSecond(_) => None,
        }
    }

    /// Returns the raw header field this division was decoded from.
    pub const fn raw(&self) -> u16 {
        match self {
            Self::TicksPerBeat(t) => u16::from_be_bytes(t.inner),
            Self::FramesPerSecond(s) => u16::from_be_bytes(s.inner),
        }
    }

    /// The length of one tick in microseconds, under the given tempo.
    ///
    /// Tempo only matters for tempo-based divisions. SMPTE divisions fix the
    /// tick length at `1s / (fps * ticks_per_frame)` and ignore the tempo
    /// argument entirely.
    pub fn micros_per_tick(&self, micros_per_beat: u32) -> f64 {
        match self {
            Self::TicksPerBeat(t) => f64::from(micros_per_beat) / f64::from(t.ticks_per_beat()),
            Self::FramesPerSecond(s) => {
                let fps = match s.fps() {
                    Some(fps) => fps.as_division(),
                    // nonstandard rate bytes are taken at face value
                    None => s.inner[0].wrapping_neg(),
                };
                let ticks_per_second =
                    (u32::from(fps) * u32::from(s.ticks_per_frame())).max(1);
                1_000_000. / f64::from(ticks_per_second)
            }
        }
    }
}

/// A tempo-based division, stored as the two raw header bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerBeat {
    pub(crate) inner: [u8; 2],
}

impl TicksPerBeat {
    /// Returns the number of ticks per quarter note.
    pub const fn ticks_per_beat(&self) -> u16 {
        u16::from_be_bytes(self.inner) & 0x7FFF
    }
}

/// An SMPTE division, stored as the two raw header bytes: a negated frame
/// rate and a tick rate per frame.
///
/// The rate byte is not validated at parse time. Files in the wild declare
/// rates outside the four the specification allows, and the flag derivation
/// must not depend on the rate being recognizable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteDivision {
    pub(crate) inner: [u8; 2],
}

impl SmpteDivision {
    /// Returns the frame rate, when the rate byte is one of the four
    /// standard SMPTE rates.
    pub const fn fps(&self) -> Option<SmpteFps> {
        match self.inner[0] as i8 {
            -24 => Some(SmpteFps::TwentyFour),
            -25 => Some(SmpteFps::TwentyFive),
            -29 => Some(SmpteFps::TwentyNine),
            -30 => Some(SmpteFps::Thirty),
            _ => None,
        }
    }

    /// Returns the raw rate byte.
    pub const fn rate_byte(&self) -> u8 {
        self.inner[0]
    }

    /// Returns the ticks per frame.
    pub const fn ticks_per_frame(&self) -> u8 {
        self.inner[1]
    }
}

/// The possible SMPTE frame rates.
///
/// The MIDI specification defines exactly four: 24 fps (film), 25 fps
/// (PAL/SECAM), 29.97 fps (NTSC drop-frame) and 30 fps (NTSC). The header
/// encodes them as negated two's-complement bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second, the NTSC drop-frame rate
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// The nominal integer rate used for tick arithmetic.
    ///
    /// Drop-frame 29.97 returns 30 here; MIDI timing divisions use the
    /// nominal rate.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// The byte this rate is encoded as in the header's high division byte.
    pub const fn as_negated_byte(&self) -> i8 {
        match self {
            Self::TwentyFour => -24,
            Self::TwentyFive => -25,
            Self::TwentyNine => -29,
            Self::Thirty => -30,
        }
    }
}
