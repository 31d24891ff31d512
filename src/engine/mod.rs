//! Interval timer engine
//!
//! `TimerSession` holds the state machine, `TimerEngine` binds it to a tone
//! emitter and gates cues on the sound toggle.

pub mod cue;
pub mod display;
pub mod mode;
pub mod session;
pub mod settings;

pub use cue::{Cue, Tone, ToneShape};
pub use display::{format_clock, Phase, TimerSnapshot, TimerStatus};
pub use mode::TimerMode;
pub use session::{TimerSession, PRE_START_SECONDS};
pub use settings::{RawSettings, TimerSettings};

use tracing::{debug, info};

use crate::audio::ToneEmitter;

/// One timer instance bound to its tone emitter
pub struct TimerEngine {
    session: TimerSession,
    emitter: Box<dyn ToneEmitter>,
}

impl TimerEngine {
    pub fn new(mode: TimerMode, settings: TimerSettings, emitter: Box<dyn ToneEmitter>) -> Self {
        Self {
            session: TimerSession::new(mode, settings),
            emitter,
        }
    }

    /// Replace the session with a fresh one for another mode. The sound toggle survives.
    pub fn select_mode(&mut self, mode: TimerMode, settings: TimerSettings) {
        let sound_enabled = self.session.sound_enabled();
        self.session = TimerSession::new(mode, settings);
        self.session.set_sound_enabled(sound_enabled);
        info!("Timer mode set to {} with {:?}", mode, settings);
    }

    pub fn start(&mut self) {
        let cue = self.session.start();
        info!(
            "Timer started in {} mode (elapsed={}s, pre-start={:?})",
            self.session.mode(),
            self.session.elapsed(),
            self.session.pre_start_countdown()
        );
        self.play(cue);
    }

    /// Toggle pause. Returns whether the timer is now paused.
    pub fn pause(&mut self) -> bool {
        let paused = self.session.pause();
        info!("Timer {}", if paused { "paused" } else { "resumed" });
        paused
    }

    pub fn reset(&mut self, to_zero: bool) {
        self.session.reset(to_zero);
        info!("Timer reset (to_zero={})", to_zero);
    }

    /// Toggle sound. Returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.session.toggle_sound();
        info!("Sound {}", if enabled { "enabled" } else { "disabled" });
        enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.session.set_sound_enabled(enabled);
    }

    /// Advance one second and play whatever cue it produced
    pub fn tick(&mut self) {
        let was_running = self.session.is_running();
        let cue = self.session.tick();
        debug!(
            "Tick: elapsed={}s round={} display={}",
            self.session.elapsed(),
            self.session.current_round(),
            self.session.display_time()
        );
        if was_running && self.session.is_finished() {
            info!(
                "Timer finished in {} mode after round {}",
                self.session.mode(),
                self.session.current_round()
            );
        }
        self.play(cue);
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.session.snapshot()
    }

    fn play(&mut self, cue: Option<Cue>) {
        let Some(cue) = cue else {
            return;
        };
        if !self.session.sound_enabled() {
            return;
        }
        debug!("Playing cue {:?}", cue);
        if let Err(e) = self.emitter.emit(cue.tone()) {
            debug!("Ignoring tone emission failure: {}", e);
        }
    }
}
