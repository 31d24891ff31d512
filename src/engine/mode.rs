//! Workout timing protocols

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Timing protocol driven by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Plain stopwatch
    Normal,
    /// Unbounded stopwatch stopped by hand when the workout is done
    #[serde(alias = "for-time", alias = "for_time")]
    ForTime,
    /// Countdown over a fixed budget, optionally repeated with rest in between
    Amrap,
    /// New round every minute
    Emom,
    /// New round every N minutes
    Otm,
    /// Fixed work/rest cycles
    Tabata,
}

impl TimerMode {
    pub const ALL: [TimerMode; 6] = [
        TimerMode::Normal,
        TimerMode::ForTime,
        TimerMode::Amrap,
        TimerMode::Emom,
        TimerMode::Otm,
        TimerMode::Tabata,
    ];

    /// Name used on the wire and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Normal => "normal",
            TimerMode::ForTime => "fortime",
            TimerMode::Amrap => "amrap",
            TimerMode::Emom => "emom",
            TimerMode::Otm => "otm",
            TimerMode::Tabata => "tabata",
        }
    }

    /// Modes whose round/phase is derived from a counting-up stopwatch
    pub fn is_interval(&self) -> bool {
        matches!(self, TimerMode::Emom | TimerMode::Otm)
    }

    /// Modes that alternate between work and rest sub-phases
    pub fn has_sub_phases(&self, total_rounds: u32) -> bool {
        match self {
            TimerMode::Tabata => true,
            TimerMode::Amrap => total_rounds > 1,
            _ => false,
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(TimerMode::Normal),
            "fortime" | "for-time" | "for_time" => Ok(TimerMode::ForTime),
            "amrap" => Ok(TimerMode::Amrap),
            "emom" => Ok(TimerMode::Emom),
            "otm" => Ok(TimerMode::Otm),
            "tabata" => Ok(TimerMode::Tabata),
            other => Err(format!("Unknown timer mode: {}", other)),
        }
    }
}
