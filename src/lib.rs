//! WOD Timer - interval training timer engine with an HTTP control surface
//!
//! The engine drives the countdowns of six workout protocols (normal, for time,
//! AMRAP, EMOM, OTM and Tabata) including the pre-start lead-in and audio cues.
//! The server wraps one engine, ticks it once per second and lets a display
//! poll its derived state.

pub mod audio;
pub mod config;
pub mod engine;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{TimerEngine, TimerMode, TimerSettings, TimerSnapshot};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
