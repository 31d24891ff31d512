//! Audio cues raised by the engine

use serde::{Deserialize, Serialize};

/// The two tone shapes a tone emitter has to support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneShape {
    ShortLow,
    LongHigh,
}

/// A concrete tone to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    pub shape: ToneShape,
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

/// Something worth an audible signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Pre-start second with more than 3 seconds left
    CountdownTick,
    /// One of the last 3 pre-start seconds
    CountdownBell,
    /// Pre-start finished, protocol begins
    StartBell,
    /// Tabata switched between work and rest
    PhaseChange,
    /// One of the last 3 seconds before an EMOM/OTM round boundary
    RoundWarning,
}

impl Cue {
    pub fn tone(&self) -> Tone {
        match self {
            Cue::CountdownTick => Tone {
                shape: ToneShape::ShortLow,
                frequency_hz: 440,
                duration_ms: 100,
            },
            Cue::CountdownBell | Cue::RoundWarning => Tone {
                shape: ToneShape::ShortLow,
                frequency_hz: 880,
                duration_ms: 150,
            },
            Cue::StartBell => Tone {
                shape: ToneShape::LongHigh,
                frequency_hz: 1320,
                duration_ms: 600,
            },
            Cue::PhaseChange => Tone {
                shape: ToneShape::LongHigh,
                frequency_hz: 1100,
                duration_ms: 500,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_bell_is_higher_than_tick() {
        assert!(Cue::CountdownBell.tone().frequency_hz > Cue::CountdownTick.tone().frequency_hz);
        assert_eq!(Cue::StartBell.tone().shape, ToneShape::LongHigh);
        assert_eq!(Cue::PhaseChange.tone().shape, ToneShape::LongHigh);
        assert_eq!(Cue::RoundWarning.tone().shape, ToneShape::ShortLow);
    }
}
