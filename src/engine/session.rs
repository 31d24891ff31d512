//! Timer session state machine
//!
//! A session is advanced one second at a time by `tick()`. Nothing here reads a
//! clock: whoever owns the session decides when a second has passed.

use serde::Serialize;

use super::{Cue, TimerMode, TimerSettings};

/// Length of the mandatory lead-in before every protocol
pub const PRE_START_SECONDS: u32 = 10;

/// Seconds before a boundary that get a warning bell
const WARNING_SECONDS: u64 = 3;

/// Mutable state of one timer, owned by exactly one engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSession {
    mode: TimerMode,
    settings: TimerSettings,
    /// Counts down for AMRAP, up for everything else
    elapsed: u64,
    running: bool,
    paused: bool,
    pre_start: Option<u32>,
    current_round: u32,
    work_phase: bool,
    finished: bool,
    amrap_initial_seconds: u64,
    /// Set once an AMRAP budget has been loaded by a completed pre-start
    amrap_armed: bool,
    sound_enabled: bool,
}

impl TimerSession {
    /// Create an idle session for a mode
    pub fn new(mode: TimerMode, settings: TimerSettings) -> Self {
        Self {
            mode,
            settings,
            elapsed: 0,
            running: false,
            paused: false,
            pre_start: None,
            current_round: 1,
            work_phase: true,
            finished: false,
            amrap_initial_seconds: settings.amrap_seconds(),
            amrap_armed: false,
            sound_enabled: true,
        }
    }

    /// Arm the pre-start countdown or resume a halted timer.
    ///
    /// Returns the cue for the first countdown second when a countdown is armed.
    pub fn start(&mut self) -> Option<Cue> {
        if self.running {
            // Halted, not stopped: just lift the pause
            self.paused = false;
            return None;
        }

        let mut cue = None;
        if self.pre_start.is_none() && self.elapsed == 0 {
            if self.mode == TimerMode::Amrap && self.amrap_armed {
                // Stopped at zero after a full budget: reload it and go straight on
                self.elapsed = self.amrap_initial_seconds;
                self.current_round = 1;
                self.work_phase = true;
            } else {
                self.pre_start = Some(PRE_START_SECONDS);
                cue = Some(Cue::CountdownTick);
            }
        }

        self.running = true;
        self.paused = false;
        self.finished = false;
        cue
    }

    /// Toggle the pause flag of a running timer. Returns the new flag.
    pub fn pause(&mut self) -> bool {
        if self.running {
            self.paused = !self.paused;
        }
        self.paused
    }

    /// Return to idle. AMRAP keeps its budget loaded unless `to_zero` is set.
    pub fn reset(&mut self, to_zero: bool) {
        self.pre_start = None;
        self.running = false;
        self.paused = false;
        self.finished = false;
        self.current_round = 1;
        self.work_phase = true;
        self.amrap_armed = false;
        self.amrap_initial_seconds = self.settings.amrap_seconds();
        self.elapsed = if self.mode == TimerMode::Amrap && !to_zero {
            self.amrap_initial_seconds
        } else {
            0
        };
    }

    /// Flip the sound gate. Returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Option<Cue> {
        if !self.running || self.paused {
            return None;
        }
        if let Some(remaining) = self.pre_start {
            return Some(self.tick_pre_start(remaining));
        }

        match self.mode {
            TimerMode::Normal | TimerMode::ForTime => {
                self.elapsed += 1;
                None
            }
            TimerMode::Amrap if self.settings.total_rounds <= 1 => self.tick_amrap_single(),
            TimerMode::Amrap => self.tick_amrap_rounds(),
            TimerMode::Emom | TimerMode::Otm => self.tick_interval(),
            TimerMode::Tabata => self.tick_tabata(),
        }
    }

    fn tick_pre_start(&mut self, remaining: u32) -> Cue {
        let next = remaining.saturating_sub(1);
        if next > 0 {
            self.pre_start = Some(next);
            return if u64::from(next) > WARNING_SECONDS {
                Cue::CountdownTick
            } else {
                Cue::CountdownBell
            };
        }

        self.pre_start = None;
        match self.mode {
            TimerMode::Amrap => {
                self.amrap_initial_seconds = self.settings.amrap_seconds();
                self.amrap_armed = true;
                self.elapsed = self.amrap_initial_seconds;
                self.current_round = 1;
                self.work_phase = true;
            }
            TimerMode::Emom | TimerMode::Otm => {
                self.elapsed = 0;
                self.current_round = 1;
            }
            _ => self.elapsed = 0,
        }
        Cue::StartBell
    }

    fn tick_amrap_single(&mut self) -> Option<Cue> {
        self.elapsed = self.elapsed.saturating_sub(1);
        if self.elapsed == 0 {
            self.finish();
        }
        None
    }

    fn tick_amrap_rounds(&mut self) -> Option<Cue> {
        self.elapsed = self.elapsed.saturating_sub(1);
        if self.elapsed > 0 {
            return None;
        }

        if !self.work_phase {
            self.work_phase = true;
            self.current_round += 1;
            self.elapsed = self.settings.amrap_seconds();
        } else if self.current_round >= self.settings.total_rounds {
            self.finish();
        } else {
            self.work_phase = false;
            self.elapsed = u64::from(self.settings.rest_seconds);
        }
        None
    }

    fn tick_interval(&mut self) -> Option<Cue> {
        let interval = self.settings.interval_seconds(self.mode);
        let next = self.elapsed + 1;
        let round = next / interval + 1;
        if round > u64::from(self.settings.total_rounds) {
            self.finish();
            return None;
        }

        self.elapsed = next;
        self.current_round = round as u32;
        let until_boundary = interval - next % interval;
        (until_boundary <= WARNING_SECONDS).then_some(Cue::RoundWarning)
    }

    fn tick_tabata(&mut self) -> Option<Cue> {
        let next = self.elapsed + 1;
        let in_work = next % self.settings.cycle_seconds() < u64::from(self.settings.work_seconds);
        if in_work == self.work_phase {
            self.elapsed = next;
            return None;
        }

        if in_work {
            if self.current_round >= self.settings.total_rounds {
                self.finish();
                return None;
            }
            self.current_round += 1;
        }
        self.elapsed = next;
        self.work_phase = in_work;
        Some(Cue::PhaseChange)
    }

    fn finish(&mut self) {
        self.running = false;
        self.paused = false;
        self.finished = true;
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pre_start_countdown(&self) -> Option<u32> {
        self.pre_start
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn is_work_phase(&self) -> bool {
        self.work_phase
    }

    pub fn amrap_initial_seconds(&self) -> u64 {
        self.amrap_initial_seconds
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RawSettings;
    use pretty_assertions::assert_eq;

    fn session(mode: TimerMode, settings: TimerSettings) -> TimerSession {
        TimerSession::new(mode, settings)
    }

    fn with(mode: TimerMode, work: u32, rest: u32, rounds: u32, amrap: u32) -> TimerSession {
        session(
            mode,
            TimerSettings {
                work_seconds: work,
                rest_seconds: rest,
                total_rounds: rounds,
                amrap_minutes: amrap,
            },
        )
    }

    /// Start and run through the whole pre-start countdown
    fn started(mut s: TimerSession) -> TimerSession {
        assert_eq!(s.start(), Some(Cue::CountdownTick));
        for _ in 0..PRE_START_SECONDS {
            s.tick();
        }
        assert_eq!(s.pre_start_countdown(), None);
        s
    }

    fn ticks(s: &mut TimerSession, n: u64) -> Vec<Cue> {
        (0..n).filter_map(|_| s.tick()).collect()
    }

    #[test]
    fn pre_start_counts_down_with_cues() {
        let mut s = with(TimerMode::Normal, 20, 10, 1, 10);
        assert_eq!(s.start(), Some(Cue::CountdownTick));
        assert!(s.is_running());
        assert_eq!(s.pre_start_countdown(), Some(10));

        let cues = ticks(&mut s, 10);
        let mut expected = vec![Cue::CountdownTick; 6];
        expected.extend([Cue::CountdownBell; 3]);
        expected.push(Cue::StartBell);
        assert_eq!(cues, expected);
        assert_eq!(s.pre_start_countdown(), None);
        assert_eq!(s.elapsed(), 0);
    }

    #[test]
    fn pre_start_gates_round_and_phase() {
        let mut s = with(TimerMode::Tabata, 1, 1, 8, 10);
        s.start();
        for _ in 0..PRE_START_SECONDS - 1 {
            s.tick();
            assert_eq!(s.current_round(), 1);
            assert!(s.is_work_phase());
            assert_eq!(s.elapsed(), 0);
        }
        assert_eq!(s.tick(), Some(Cue::StartBell));
        assert_eq!(s.current_round(), 1);
    }

    #[test]
    fn exactly_one_start_bell() {
        let mut s = with(TimerMode::Emom, 20, 10, 2, 10);
        s.start();
        let cues = ticks(&mut s, 200);
        assert_eq!(cues.iter().filter(|c| **c == Cue::StartBell).count(), 1);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut s = started(with(TimerMode::Normal, 20, 10, 1, 10));
        assert_eq!(s.start(), None);
        assert_eq!(s.pre_start_countdown(), None);
        ticks(&mut s, 3);
        assert_eq!(s.elapsed(), 3);
    }

    #[test]
    fn normal_counts_up_without_limit() {
        let mut s = started(with(TimerMode::ForTime, 20, 10, 1, 10));
        let cues = ticks(&mut s, 5000);
        assert!(cues.is_empty());
        assert_eq!(s.elapsed(), 5000);
        assert!(s.is_running());
    }

    #[test]
    fn pause_twice_restores_running_state() {
        let mut s = started(with(TimerMode::Normal, 20, 10, 1, 10));
        ticks(&mut s, 5);
        let before = s.clone();

        assert!(s.pause());
        ticks(&mut s, 30);
        assert_eq!(s.elapsed(), 5);
        assert!(!s.pause());
        assert_eq!(s, before);

        s.tick();
        assert_eq!(s.elapsed(), 6);
    }

    #[test]
    fn pause_is_noop_when_not_running() {
        let mut s = with(TimerMode::Normal, 20, 10, 1, 10);
        assert!(!s.pause());
        assert!(!s.is_paused());
    }

    #[test]
    fn resume_after_pause_skips_pre_start() {
        let mut s = started(with(TimerMode::Normal, 20, 10, 1, 10));
        ticks(&mut s, 4);
        s.pause();
        assert_eq!(s.start(), None);
        assert!(!s.is_paused());
        assert_eq!(s.pre_start_countdown(), None);
        assert_eq!(s.elapsed(), 4);
    }

    #[test]
    fn resume_at_zero_elapsed_does_not_rearm_pre_start() {
        for mode in [TimerMode::Normal, TimerMode::Emom, TimerMode::Otm, TimerMode::Tabata] {
            let mut s = started(session(mode, TimerSettings::defaults_for(mode)));
            assert_eq!(s.elapsed(), 0);
            assert!(s.pause());

            assert_eq!(s.start(), None, "{}", mode);
            assert!(s.is_running());
            assert!(!s.is_paused());
            assert_eq!(s.pre_start_countdown(), None);

            let cues = ticks(&mut s, 10);
            assert!(!cues.contains(&Cue::StartBell), "{}", mode);
            assert_eq!(s.elapsed(), 10);
        }
    }

    #[test]
    fn pausing_the_pre_start_holds_the_countdown() {
        let mut s = with(TimerMode::Tabata, 20, 10, 8, 10);
        s.start();
        ticks(&mut s, 3);
        s.pause();
        ticks(&mut s, 5);
        assert_eq!(s.pre_start_countdown(), Some(7));
        assert_eq!(s.start(), None);
        assert_eq!(s.pre_start_countdown(), Some(7));
    }

    #[test]
    fn tabata_work_to_rest() {
        let mut s = started(with(TimerMode::Tabata, 20, 10, 8, 10));
        assert!(ticks(&mut s, 19).is_empty());
        assert!(s.is_work_phase());
        assert_eq!(s.display_seconds(), 1);

        assert_eq!(s.tick(), Some(Cue::PhaseChange));
        assert!(!s.is_work_phase());
        assert_eq!(s.display_seconds(), 10);
        assert_eq!(s.current_round(), 1);

        assert_eq!(ticks(&mut s, 10), vec![Cue::PhaseChange]);
        assert!(s.is_work_phase());
        assert_eq!(s.current_round(), 2);
        assert_eq!(s.display_seconds(), 20);
    }

    #[test]
    fn tabata_finishes_after_all_rounds() {
        let mut s = started(with(TimerMode::Tabata, 20, 10, 8, 10));
        let mut last_round = 1;
        let mut count = 0;
        while s.is_running() {
            s.tick();
            assert!(s.current_round() >= last_round);
            assert!(s.current_round() <= 8);
            last_round = s.current_round();
            count += 1;
            assert!(count <= 8 * 30);
        }
        assert_eq!(count, 8 * 30);
        assert_eq!(s.current_round(), 8);
        assert!(s.is_finished());
    }

    #[test]
    fn emom_round_boundary() {
        let mut s = started(with(TimerMode::Emom, 20, 10, 10, 10));
        let cues = ticks(&mut s, 59);
        assert_eq!(cues, vec![Cue::RoundWarning; 3]);
        assert_eq!(s.display_seconds(), 1);
        assert_eq!(s.current_round(), 1);

        assert_eq!(s.tick(), None);
        assert_eq!(s.current_round(), 2);
        assert_eq!(s.display_seconds(), 60);
        assert_eq!(s.elapsed(), 60);
        assert_eq!(s.total_elapsed(), Some(60));
    }

    #[test]
    fn emom_stops_without_advancing_past_last_round() {
        let mut s = started(with(TimerMode::Emom, 20, 10, 2, 10));
        ticks(&mut s, 119);
        assert!(s.is_running());
        assert_eq!(s.current_round(), 2);

        s.tick();
        assert!(!s.is_running());
        assert_eq!(s.elapsed(), 119);
        assert_eq!(s.current_round(), 2);

        ticks(&mut s, 10);
        assert_eq!(s.elapsed(), 119);
    }

    #[test]
    fn otm_uses_minutes_per_round() {
        let mut s = started(with(TimerMode::Otm, 2, 10, 3, 10));
        let cues = ticks(&mut s, 119);
        assert_eq!(cues, vec![Cue::RoundWarning; 3]);
        assert_eq!(s.current_round(), 1);
        assert_eq!(s.display_seconds(), 1);

        s.tick();
        assert_eq!(s.current_round(), 2);
        assert_eq!(s.display_seconds(), 120);

        let mut count = 120;
        while s.is_running() {
            s.tick();
            count += 1;
        }
        assert_eq!(count, 3 * 120);
        assert_eq!(s.current_round(), 3);
    }

    #[test]
    fn amrap_single_round_counts_down_and_finishes() {
        let mut s = started(with(TimerMode::Amrap, 20, 10, 1, 10));
        assert_eq!(s.elapsed(), 600);
        assert!(ticks(&mut s, 599).is_empty());
        assert!(s.is_running());

        s.tick();
        assert_eq!(s.elapsed(), 0);
        assert!(!s.is_running());
        assert!(s.is_finished());
    }

    #[test]
    fn amrap_multi_round_alternates_work_and_rest() {
        let mut s = started(with(TimerMode::Amrap, 20, 5, 2, 1));
        assert_eq!(s.elapsed(), 60);

        assert!(ticks(&mut s, 59).is_empty());
        assert_eq!(s.elapsed(), 1);
        assert!(s.is_work_phase());

        assert_eq!(s.tick(), None);
        assert!(!s.is_work_phase());
        assert_eq!(s.elapsed(), 5);
        assert_eq!(s.current_round(), 1);

        assert!(ticks(&mut s, 5).is_empty());
        assert!(s.is_work_phase());
        assert_eq!(s.current_round(), 2);
        assert_eq!(s.elapsed(), 60);

        assert!(ticks(&mut s, 59).is_empty());
        assert!(s.is_running());
        assert_eq!(s.tick(), None);
        assert!(!s.is_running());
        assert_eq!(s.elapsed(), 0);
        assert_eq!(s.current_round(), 2);
    }

    #[test]
    fn amrap_restart_after_finishing_reloads_budget() {
        let mut s = started(with(TimerMode::Amrap, 20, 10, 1, 1));
        ticks(&mut s, 60);
        assert!(!s.is_running());

        assert_eq!(s.start(), None);
        assert!(s.is_running());
        assert_eq!(s.pre_start_countdown(), None);
        assert_eq!(s.elapsed(), 60);
    }

    #[test]
    fn amrap_configured_to_ten_minutes_is_still_reloaded() {
        let mut s = started(with(TimerMode::Amrap, 20, 10, 1, 10));
        ticks(&mut s, 600);
        s.start();
        assert_eq!(s.elapsed(), 600);
        assert_eq!(s.amrap_initial_seconds(), 600);
    }

    #[test]
    fn amrap_soft_reset_keeps_budget_loaded() {
        let mut s = started(with(TimerMode::Amrap, 20, 10, 1, 3));
        ticks(&mut s, 42);
        s.reset(false);
        assert_eq!(s.elapsed(), 180);
        assert!(!s.is_running());

        assert_eq!(s.start(), None);
        assert_eq!(s.pre_start_countdown(), None);
        s.tick();
        assert_eq!(s.elapsed(), 179);
    }

    #[test]
    fn reset_to_zero_restores_defaults() {
        for mode in TimerMode::ALL {
            let mut s = started(session(mode, TimerSettings::defaults_for(mode)));
            ticks(&mut s, 75);
            s.pause();
            s.reset(true);
            assert_eq!(s.elapsed(), 0, "{}", mode);
            assert_eq!(s.current_round(), 1);
            assert!(s.is_work_phase());
            assert_eq!(s.pre_start_countdown(), None);
            assert!(!s.is_running());
            assert!(!s.is_paused());

            // Back through the pre-start
            assert_eq!(s.start(), Some(Cue::CountdownTick));
        }
    }

    #[test]
    fn reset_during_pre_start_disarms_it() {
        let mut s = with(TimerMode::Emom, 20, 10, 10, 10);
        s.start();
        ticks(&mut s, 4);
        s.reset(true);
        assert_eq!(s.pre_start_countdown(), None);
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn rounds_never_decrease_or_exceed_total() {
        let mut multi_round_amrap = TimerSettings::defaults_for(TimerMode::Amrap);
        multi_round_amrap.amrap_minutes = 1;
        multi_round_amrap.rest_seconds = 5;
        multi_round_amrap.total_rounds = 3;
        let cases = [
            (TimerMode::Amrap, multi_round_amrap),
            (TimerMode::Emom, TimerSettings::defaults_for(TimerMode::Emom)),
            (TimerMode::Otm, TimerSettings::defaults_for(TimerMode::Otm)),
            (TimerMode::Tabata, TimerSettings::defaults_for(TimerMode::Tabata)),
        ];

        for (mode, settings) in cases {
            let mut s = started(session(mode, settings));
            let mut last_round = s.current_round();
            let mut cues = Vec::new();
            while s.is_running() {
                cues.extend(s.tick());
                assert!(s.current_round() >= last_round, "{} round went back", mode);
                assert!(s.current_round() <= settings.total_rounds, "{} overran", mode);
                last_round = s.current_round();
            }
            assert_eq!(last_round, settings.total_rounds, "{}", mode);
            if mode == TimerMode::Amrap {
                assert!(cues.is_empty());
            }
        }
    }

    #[test]
    fn bounded_modes_terminate() {
        for mode in [TimerMode::Amrap, TimerMode::Emom, TimerMode::Otm, TimerMode::Tabata] {
            let settings = TimerSettings::defaults_for(mode);
            let mut s = started(session(mode, settings));
            let bound = match mode {
                TimerMode::Amrap => settings.amrap_seconds(),
                TimerMode::Tabata => settings.cycle_seconds() * u64::from(settings.total_rounds),
                _ => settings.interval_seconds(mode) * u64::from(settings.total_rounds),
            };
            let mut count = 0;
            while s.is_running() {
                s.tick();
                count += 1;
                assert!(count <= bound, "{} did not stop", mode);
            }
        }
    }

    #[test]
    fn invalid_tabata_config_behaves_like_defaults() {
        let raw = RawSettings {
            work_time: Some(String::new()),
            ..RawSettings::default()
        };
        let settings = TimerSettings::normalize(TimerMode::Tabata, &raw);
        let mut s = started(session(TimerMode::Tabata, settings));
        ticks(&mut s, 19);
        assert!(s.is_work_phase());
        assert_eq!(s.tick(), Some(Cue::PhaseChange));
    }

    #[test]
    fn toggle_sound_flips() {
        let mut s = with(TimerMode::Normal, 20, 10, 1, 10);
        assert!(s.sound_enabled());
        assert!(!s.toggle_sound());
        assert!(s.toggle_sound());
    }
}
