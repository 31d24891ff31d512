//! Values derived from a session for the presentation layer
//!
//! Nothing in here is stored; everything is recomputed from the session counters.

use serde::{Deserialize, Serialize};

use super::{TimerMode, TimerSession, TimerSettings};

/// What the athlete should be doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Prepare,
    Work,
    Rest,
    Time,
}

impl Phase {
    /// On-screen label
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Prepare => "PREPARATE",
            Phase::Work => "TRABAJO",
            Phase::Rest => "DESCANSO",
            Phase::Time => "TIEMPO",
        }
    }

    /// Accent colour used by displays
    pub fn color(&self) -> &'static str {
        match self {
            Phase::Prepare => "#f59e0b",
            Phase::Work => "#22c55e",
            Phase::Rest => "#ef4444",
            Phase::Time => "#3b82f6",
        }
    }
}

/// Coarse lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    PreStart,
    Active,
    Paused,
    Finished,
}

/// Everything a display needs to render one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub status: TimerStatus,
    pub phase: Phase,
    pub phase_label: String,
    pub phase_color: String,
    pub display_seconds: u64,
    pub display_time: String,
    pub elapsed_seconds: u64,
    pub total_elapsed_seconds: Option<u64>,
    pub total_elapsed_time: Option<String>,
    pub current_round: u32,
    pub total_rounds: u32,
    pub pre_start_countdown: Option<u32>,
    pub running: bool,
    pub paused: bool,
    pub sound_enabled: bool,
    pub settings: TimerSettings,
}

impl TimerSession {
    pub fn status(&self) -> TimerStatus {
        if self.is_paused() {
            TimerStatus::Paused
        } else if self.pre_start_countdown().is_some() {
            TimerStatus::PreStart
        } else if self.is_running() {
            TimerStatus::Active
        } else if self.is_finished() {
            TimerStatus::Finished
        } else {
            TimerStatus::Idle
        }
    }

    pub fn phase(&self) -> Phase {
        if self.pre_start_countdown().is_some() {
            Phase::Prepare
        } else if self.mode().has_sub_phases(self.settings().total_rounds) {
            if self.is_work_phase() {
                Phase::Work
            } else {
                Phase::Rest
            }
        } else {
            Phase::Time
        }
    }

    /// Seconds shown on the big clock
    pub fn display_seconds(&self) -> u64 {
        if let Some(countdown) = self.pre_start_countdown() {
            return u64::from(countdown);
        }

        let settings = self.settings();
        let elapsed = self.elapsed();
        match self.mode() {
            TimerMode::Tabata => {
                let work = u64::from(settings.work_seconds);
                let cycle = settings.cycle_seconds();
                let position = elapsed % cycle;
                if position < work {
                    work - position
                } else {
                    cycle - position
                }
            }
            TimerMode::Emom | TimerMode::Otm => {
                let interval = settings.interval_seconds(self.mode());
                interval - elapsed % interval
            }
            TimerMode::Amrap | TimerMode::Normal | TimerMode::ForTime => elapsed,
        }
    }

    pub fn display_time(&self) -> String {
        format_clock(self.display_seconds())
    }

    /// Raw stopwatch for EMOM/OTM, shown next to the per-round countdown
    pub fn total_elapsed(&self) -> Option<u64> {
        self.mode().is_interval().then(|| self.elapsed())
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let phase = self.phase();
        let total_elapsed = self.total_elapsed();
        TimerSnapshot {
            mode: self.mode(),
            status: self.status(),
            phase,
            phase_label: phase.label().to_string(),
            phase_color: phase.color().to_string(),
            display_seconds: self.display_seconds(),
            display_time: self.display_time(),
            elapsed_seconds: self.elapsed(),
            total_elapsed_seconds: total_elapsed,
            total_elapsed_time: total_elapsed.map(format_clock),
            current_round: self.current_round(),
            total_rounds: self.settings().total_rounds,
            pre_start_countdown: self.pre_start_countdown(),
            running: self.is_running(),
            paused: self.is_paused(),
            sound_enabled: self.sound_enabled(),
            settings: *self.settings(),
        }
    }
}

/// Format seconds as `MM:SS`, or `H:MM:SS` from one hour on
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
