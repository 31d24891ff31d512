//! Tone emission capability
//!
//! The engine only ever talks to a `ToneEmitter`. Implementations are free to
//! fail; the engine logs the failure and carries on.

pub mod emitters;

use crate::engine::Tone;

pub use emitters::{LogEmitter, SilentEmitter, TerminalBell, ToneBackend};

/// Something that can play a tone
pub trait ToneEmitter: Send {
    fn emit(&mut self, tone: Tone) -> Result<(), String>;
}
