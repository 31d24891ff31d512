//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    audio::ToneBackend,
    engine::{RawSettings, TimerMode, TimerSettings},
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "wod-timer")]
#[command(about = "An interval training timer served over HTTP for workout displays")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial timer mode (normal, fortime, amrap, emom, otm, tabata)
    #[arg(short, long, default_value = "tabata")]
    pub mode: TimerMode,

    /// Work seconds per cycle (minutes per round for otm)
    #[arg(long)]
    pub work_time: Option<String>,

    /// Rest seconds per cycle
    #[arg(long)]
    pub rest_time: Option<String>,

    /// Number of rounds
    #[arg(long)]
    pub total_rounds: Option<String>,

    /// AMRAP duration in minutes
    #[arg(long)]
    pub amrap_time: Option<String>,

    /// How tones are played
    #[arg(long, value_enum, default_value = "bell")]
    pub tones: ToneBackend,

    /// Start with sound cues disabled
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Raw timer settings as given on the command line
    pub fn raw_settings(&self) -> RawSettings {
        RawSettings {
            work_time: self.work_time.clone(),
            rest_time: self.rest_time.clone(),
            total_rounds: self.total_rounds.clone(),
            amrap_time: self.amrap_time.clone(),
        }
    }

    /// Validated settings for the initial mode
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings::normalize(self.mode, &self.raw_settings())
    }
}
