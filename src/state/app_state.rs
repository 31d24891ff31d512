//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::engine::{TimerEngine, TimerMode, TimerSettings, TimerSnapshot};
use super::TimerCommand;

/// Shared state: the one timer engine plus the channels around it
pub struct AppState {
    /// The timer engine. Every mutation goes through this lock.
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Notifications for the tick driver
    pub command_tx: broadcast::Sender<TimerCommand>,
    /// Latest snapshot after every mutation
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState around an engine
    pub fn new(port: u16, host: String, engine: TimerEngine) -> Self {
        let (command_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        Self {
            engine: Arc::new(Mutex::new(engine)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            command_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply an update to the engine, publish the new snapshot and notify the tick driver
    pub fn update_engine<F, T>(
        &self,
        action: &str,
        command: Option<TimerCommand>,
        updater: F,
    ) -> Result<(T, TimerSnapshot), String>
    where
        F: FnOnce(&mut TimerEngine) -> Result<T, String>,
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let output = updater(&mut *engine)?;
        let snapshot = engine.snapshot();
        drop(engine); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish(snapshot.clone());

        if let Some(command) = command {
            // No receiver just means the driver is not running yet
            if let Err(e) = self.command_tx.send(command) {
                warn!("Failed to send timer command: {}", e);
            }
        }

        Ok((output, snapshot))
    }

    /// Start or resume the timer
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        self.update_engine("start", Some(TimerCommand::Started), |engine| {
            engine.start();
            Ok(())
        })
        .map(|(_, snapshot)| snapshot)
    }

    /// Toggle pause
    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        self.update_engine("pause", None, |engine| Ok(engine.pause()))
            .map(|(_, snapshot)| snapshot)
    }

    /// Reset the timer and disarm the tick driver
    pub fn reset(&self, to_zero: bool) -> Result<TimerSnapshot, String> {
        self.update_engine("reset", Some(TimerCommand::Reset), |engine| {
            engine.reset(to_zero);
            Ok(())
        })
        .map(|(_, snapshot)| snapshot)
    }

    /// Toggle sound cues
    pub fn toggle_sound(&self) -> Result<TimerSnapshot, String> {
        self.update_engine("sound", None, |engine| Ok(engine.toggle_sound()))
            .map(|(_, snapshot)| snapshot)
    }

    /// Switch protocol. Refused while the timer is running.
    pub fn select_mode(
        &self,
        mode: TimerMode,
        settings: TimerSettings,
    ) -> Result<TimerSnapshot, String> {
        info!("Selecting timer mode: {}", mode);
        self.update_engine("mode", Some(TimerCommand::ModeChanged), |engine| {
            if engine.is_running() {
                return Err("Cannot change mode while the timer is running".to_string());
            }
            engine.select_mode(mode, settings);
            Ok(())
        })
        .map(|(_, snapshot)| snapshot)
    }

    /// Advance the engine by one second. Returns whether it is still running.
    pub fn tick(&self) -> Result<bool, String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        engine.tick();
        let running = engine.is_running();
        let snapshot = engine.snapshot();
        drop(engine);

        self.publish(snapshot);
        Ok(running)
    }

    /// Get the current snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.engine.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        // Skip notifying watchers when nothing visible changed
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
