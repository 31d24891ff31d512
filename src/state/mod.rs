//! State management module
//!
//! This module contains the shared timer state and the commands it emits.

pub mod app_state;
pub mod command;

// Re-export main types
pub use app_state::AppState;
pub use command::TimerCommand;
