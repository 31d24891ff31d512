//! Timer configuration and its normalization

use serde::{Deserialize, Deserializer, Serialize};

use super::TimerMode;

pub const DEFAULT_WORK_SECONDS: u32 = 20;
pub const DEFAULT_REST_SECONDS: u32 = 10;
pub const DEFAULT_OTM_MINUTES: u32 = 1;
pub const DEFAULT_AMRAP_MINUTES: u32 = 10;

/// Configuration as entered by the user. Every field may be missing or garbage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSettings {
    #[serde(default, deserialize_with = "lenient_string")]
    pub work_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rest_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_rounds: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amrap_time: Option<String>,
}

/// Validated configuration. All values are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Seconds of work per cycle. For OTM this is the round length in minutes.
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub total_rounds: u32,
    pub amrap_minutes: u32,
}

impl TimerSettings {
    /// Defaults for a mode when nothing was entered
    pub fn defaults_for(mode: TimerMode) -> Self {
        Self {
            work_seconds: match mode {
                TimerMode::Otm => DEFAULT_OTM_MINUTES,
                _ => DEFAULT_WORK_SECONDS,
            },
            rest_seconds: DEFAULT_REST_SECONDS,
            total_rounds: default_rounds(mode),
            amrap_minutes: DEFAULT_AMRAP_MINUTES,
        }
    }

    /// Coerce raw input to positive integers, falling back per field to the mode default
    pub fn normalize(mode: TimerMode, raw: &RawSettings) -> Self {
        let defaults = Self::defaults_for(mode);
        Self {
            work_seconds: coerce(raw.work_time.as_deref(), defaults.work_seconds),
            rest_seconds: coerce(raw.rest_time.as_deref(), defaults.rest_seconds),
            total_rounds: coerce(raw.total_rounds.as_deref(), defaults.total_rounds),
            amrap_minutes: coerce(raw.amrap_time.as_deref(), defaults.amrap_minutes),
        }
    }

    /// Configured AMRAP budget in seconds
    pub fn amrap_seconds(&self) -> u64 {
        u64::from(self.amrap_minutes) * 60
    }

    /// Length of one EMOM/OTM round in seconds
    pub fn interval_seconds(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Otm => u64::from(self.work_seconds) * 60,
            _ => 60,
        }
    }

    /// Length of one Tabata work+rest cycle in seconds
    pub fn cycle_seconds(&self) -> u64 {
        u64::from(self.work_seconds) + u64::from(self.rest_seconds)
    }
}

fn default_rounds(mode: TimerMode) -> u32 {
    match mode {
        TimerMode::Tabata => 8,
        TimerMode::Emom => 10,
        TimerMode::Otm => 5,
        TimerMode::Amrap | TimerMode::Normal | TimerMode::ForTime => 1,
    }
}

fn coerce(value: Option<&str>, default: u32) -> u32 {
    let Some(value) = value else {
        return default;
    };
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 1.0 && n <= f64::from(u32::MAX) => n.trunc() as u32,
        _ => default,
    }
}

/// Accept strings, numbers or null for a raw field
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(work: &str) -> RawSettings {
        RawSettings {
            work_time: Some(work.to_string()),
            ..RawSettings::default()
        }
    }

    #[test]
    fn missing_fields_use_mode_defaults() {
        let tabata = TimerSettings::normalize(TimerMode::Tabata, &RawSettings::default());
        assert_eq!(
            tabata,
            TimerSettings {
                work_seconds: 20,
                rest_seconds: 10,
                total_rounds: 8,
                amrap_minutes: 10,
            }
        );
        assert_eq!(TimerSettings::defaults_for(TimerMode::Emom).total_rounds, 10);
        assert_eq!(TimerSettings::defaults_for(TimerMode::Otm).total_rounds, 5);
        assert_eq!(TimerSettings::defaults_for(TimerMode::Otm).work_seconds, 1);
        assert_eq!(TimerSettings::defaults_for(TimerMode::Amrap).total_rounds, 1);
    }

    #[test]
    fn invalid_values_fall_back_per_field() {
        for bad in ["", "  ", "abc", "0", "-5", "NaN", "inf", "0.5"] {
            let settings = TimerSettings::normalize(TimerMode::Tabata, &raw(bad));
            assert_eq!(settings.work_seconds, 20, "input {:?}", bad);
        }
    }

    #[test]
    fn numeric_strings_are_coerced() {
        assert_eq!(TimerSettings::normalize(TimerMode::Tabata, &raw(" 45 ")).work_seconds, 45);
        assert_eq!(TimerSettings::normalize(TimerMode::Tabata, &raw("2.7")).work_seconds, 2);
    }

    #[test]
    fn raw_settings_accept_numbers_and_strings() {
        let parsed: RawSettings =
            serde_json::from_str(r#"{"work_time": 30, "rest_time": "15", "total_rounds": null}"#)
                .unwrap();
        assert_eq!(parsed.work_time.as_deref(), Some("30"));
        assert_eq!(parsed.rest_time.as_deref(), Some("15"));
        assert_eq!(parsed.total_rounds, None);
        assert_eq!(parsed.amrap_time, None);
    }

    #[test]
    fn otm_interval_is_minutes_per_round() {
        let settings = TimerSettings::normalize(TimerMode::Otm, &raw("3"));
        assert_eq!(settings.interval_seconds(TimerMode::Otm), 180);
        assert_eq!(settings.interval_seconds(TimerMode::Emom), 60);
    }
}
