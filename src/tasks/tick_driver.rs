//! One-second tick source for the timer engine

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::{
        self,
        error::{RecvError, TryRecvError},
    },
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, TimerCommand};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the engine once per second while it is running.
///
/// The receiver is passed in so callers can subscribe before spawning and never
/// miss the first `Started`.
pub async fn tick_driver_task(
    state: Arc<AppState>,
    mut command_rx: broadcast::Receiver<TimerCommand>,
) {
    info!("Starting tick driver task");

    loop {
        // Idle: wait until something starts the timer
        match command_rx.recv().await {
            Ok(TimerCommand::Started) => {
                debug!("Tick source armed");
                if !run_ticks(&state, &mut command_rx).await {
                    break;
                }
                debug!("Tick source disarmed");
            }
            Ok(command) => {
                debug!("Tick driver idle, ignoring {:?}", command);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Tick driver missed {} commands", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }

    info!("Tick driver task stopped");
}

/// Tick until the engine stops or a command disarms the source.
/// Returns false once the command channel is gone.
async fn run_ticks(
    state: &AppState,
    command_rx: &mut broadcast::Receiver<TimerCommand>,
) -> bool {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // A queued Reset must win over a tick that became due at the same time
                if let Some(keep_going) = drain_commands(command_rx) {
                    return keep_going;
                }
                match state.tick() {
                    Ok(true) => {}
                    Ok(false) => {
                        debug!("Timer no longer running");
                        return true;
                    }
                    Err(e) => {
                        error!("Failed to tick timer: {}", e);
                        return true;
                    }
                }
            }

            command = command_rx.recv() => {
                match command {
                    Ok(command) if command.disarms() => {
                        debug!("Received {:?}, stopping ticks", command);
                        return true;
                    }
                    // Resume while armed; the interval keeps its phase
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Tick driver missed {} commands", skipped);
                    }
                    Err(RecvError::Closed) => return false,
                }
            }
        }
    }
}

/// Consume commands that arrived since the last poll.
/// Returns `Some` when the tick source has to stop, with `run_ticks`' meaning.
fn drain_commands(command_rx: &mut broadcast::Receiver<TimerCommand>) -> Option<bool> {
    loop {
        match command_rx.try_recv() {
            Ok(command) if command.disarms() => {
                debug!("Received {:?} before tick, stopping ticks", command);
                return Some(true);
            }
            Ok(_) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Tick driver missed {} commands", skipped);
            }
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => return Some(false),
        }
    }
}
