//! Built-in tone emitters

use std::io::{self, Write};

use clap::ValueEnum;
use tracing::{debug, info};

use super::ToneEmitter;
use crate::engine::{Tone, ToneShape};

/// Emitter selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToneBackend {
    /// Ring the terminal bell
    Bell,
    /// Log every tone
    Log,
    /// Play nothing
    Silent,
}

impl ToneBackend {
    pub fn build(self) -> Box<dyn ToneEmitter> {
        match self {
            ToneBackend::Bell => Box::new(TerminalBell::stderr()),
            ToneBackend::Log => Box::new(LogEmitter),
            ToneBackend::Silent => Box::new(SilentEmitter),
        }
    }
}

/// Rings the ASCII bell on a terminal. Long tones ring twice.
pub struct TerminalBell<W: Write + Send> {
    out: W,
}

impl TerminalBell<io::Stderr> {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ToneEmitter for TerminalBell<W> {
    fn emit(&mut self, tone: Tone) -> Result<(), String> {
        let bell: &[u8] = match tone.shape {
            ToneShape::ShortLow => b"\x07",
            ToneShape::LongHigh => b"\x07\x07",
        };
        self.out
            .write_all(bell)
            .and_then(|_| self.out.flush())
            .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;
        debug!("Rang terminal bell for {:?} tone", tone.shape);
        Ok(())
    }
}

/// Logs tones instead of playing them
pub struct LogEmitter;

impl ToneEmitter for LogEmitter {
    fn emit(&mut self, tone: Tone) -> Result<(), String> {
        info!(
            "Tone: {:?} {}Hz for {}ms",
            tone.shape, tone.frequency_hz, tone.duration_ms
        );
        Ok(())
    }
}

pub struct SilentEmitter;

impl ToneEmitter for SilentEmitter {
    fn emit(&mut self, _tone: Tone) -> Result<(), String> {
        Ok(())
    }
}
