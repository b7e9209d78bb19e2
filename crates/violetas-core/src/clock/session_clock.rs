//! Wall-clock derivations for a one-hour meeting.
//!
//! The clock never reads system time. Hosts pass the current local
//! timestamp in, which keeps every derivation deterministic.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::segment::{BreakoutSession, Segment, SessionState};
use crate::error::{ConfigError, ValidationError};
use crate::language::Language;

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Minute thresholds for one meeting hour.
///
/// All four minute values describe the same hour layout and are validated
/// together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// English is only shown before this minute, and only on even weekdays.
    #[serde(default = "default_language_switch_minute")]
    pub language_switch_minute: u32,
    /// From this minute on the meeting is in farewells.
    #[serde(default = "default_farewell_minute")]
    pub farewell_minute: u32,
    /// Minute by which both breakout rounds are over.
    #[serde(default = "default_breakout_end_minute")]
    pub breakout_end_minute: u32,
    #[serde(default = "default_hour_minutes")]
    pub hour_minutes: u32,
    /// How often the host re-evaluates the clock.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
}

fn default_language_switch_minute() -> u32 {
    30
}
fn default_farewell_minute() -> u32 {
    55
}
fn default_breakout_end_minute() -> u32 {
    53
}
fn default_hour_minutes() -> u32 {
    60
}
fn default_tick_interval_secs() -> u64 {
    1
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            language_switch_minute: default_language_switch_minute(),
            farewell_minute: default_farewell_minute(),
            breakout_end_minute: default_breakout_end_minute(),
            hour_minutes: default_hour_minutes(),
            tick_interval_secs: default_tick_interval_secs(),
        }
    }
}

impl ClockConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first inconsistent key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: format!("clock.{key}"),
            message,
        };
        if self.hour_minutes == 0 || self.hour_minutes > 60 {
            return Err(invalid("hour_minutes", "must be between 1 and 60".into()));
        }
        if self.language_switch_minute >= self.hour_minutes {
            return Err(invalid(
                "language_switch_minute",
                format!("must be below hour_minutes ({})", self.hour_minutes),
            ));
        }
        if self.farewell_minute > self.hour_minutes {
            return Err(invalid(
                "farewell_minute",
                format!("must not exceed hour_minutes ({})", self.hour_minutes),
            ));
        }
        if self.breakout_end_minute > self.farewell_minute {
            return Err(invalid(
                "breakout_end_minute",
                format!("must not exceed farewell_minute ({})", self.farewell_minute),
            ));
        }
        if !(1..=60).contains(&self.tick_interval_secs) {
            return Err(invalid("tick_interval_secs", "must be between 1 and 60".into()));
        }
        Ok(())
    }
}

/// Derives language, segment and remaining time from a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    language_switch_minute: u32,
    farewell_minute: u32,
    breakout_end_minute: u32,
    hour_minutes: u32,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

impl SessionClock {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            language_switch_minute: config.language_switch_minute,
            farewell_minute: config.farewell_minute,
            breakout_end_minute: config.breakout_end_minute,
            hour_minutes: config.hour_minutes,
        }
    }

    /// English on even weekdays (Sunday = 0) during the first half hour,
    /// Spanish otherwise.
    pub fn derive_language(&self, at: NaiveDateTime) -> Language {
        let day = at.weekday().num_days_from_sunday();
        if day % 2 == 0 && at.minute() < self.language_switch_minute {
            Language::En
        } else {
            Language::Es
        }
    }

    /// Forces `Farewells` once the farewell minute is reached, otherwise
    /// keeps `previous`. Never leaves `Farewells`.
    pub fn derive_segment(&self, at: NaiveDateTime, previous: Segment) -> Segment {
        if at.minute() >= self.farewell_minute {
            Segment::Farewells
        } else {
            previous
        }
    }

    /// Whole minutes left in `segment`, clamped at zero.
    pub fn remaining(
        &self,
        segment: Segment,
        breakout_session: Option<BreakoutSession>,
        at: NaiveDateTime,
    ) -> u32 {
        let minute = i64::from(at.minute());
        let raw = match (segment, breakout_session) {
            // The current minute is already under way.
            (Segment::Farewells, _) => i64::from(self.hour_minutes) - minute - 1,
            // Two rounds share what is left before the breakout end.
            (Segment::Breakout, Some(_)) => {
                (i64::from(self.breakout_end_minute) - minute - 1).div_euclid(2)
            }
            (Segment::Breakout, None) | (Segment::Greetings, _) => 0,
        };
        u32::try_from(raw.max(0)).unwrap_or(0)
    }

    /// Full display state at `at`, given the segment the session was in.
    pub fn evaluate(
        &self,
        at: NaiveDateTime,
        previous: Segment,
        breakout_session: Option<BreakoutSession>,
    ) -> SessionState {
        let language = self.derive_language(at);
        let segment = self.derive_segment(at, previous);
        let remaining_min = self.remaining(segment, breakout_session, at);
        debug!(%at, %language, ?segment, remaining_min, "clock evaluated");
        SessionState {
            language,
            segment,
            remaining_min,
        }
    }
}

/// Parse a date-picker timestamp such as `2024-01-02T10:15`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidTimestamp` when no accepted format
/// matches.
pub fn parse_wall_clock(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = input.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            input: input.to_string(),
        })
}
