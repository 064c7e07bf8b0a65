//! Wall-clock parsing and elapsed-time normalization
//!
//! Readings are entered as 24-hour "HH:MM" strings. The first reading of a session is the
//! time origin; every later reading is expressed as minutes since that origin. A session
//! may cross midnight once: a negative wall-clock difference is corrected by a full day.
//! Sessions longer than 24 hours cannot be represented.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ReadingError;
use crate::reading::Measurement;

/// Minutes in one day, added once when a session crosses midnight
pub const MINUTES_PER_DAY: u32 = 1440;

fn wall_clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("wall clock pattern is valid")
    })
}

/// A time of day with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallClock {
    hours: u8,
    minutes: u8,
}

impl WallClock {
    /// Create a wall clock, returning `None` outside 00:00..=23:59
    pub fn new(hours: u8, minutes: u8) -> Option<Self> {
        (hours < 24 && minutes < 60).then_some(Self { hours, minutes })
    }

    /// Parse a strict "HH:MM" string (surrounding whitespace is ignored)
    pub fn parse(text: &str) -> Result<Self, ReadingError> {
        let trimmed = text.trim();
        let caps = wall_clock_pattern()
            .captures(trimmed)
            .ok_or_else(|| ReadingError::InvalidFormat(text.to_string()))?;

        // The pattern guarantees two in-range digits per group
        let hours = caps[1]
            .parse()
            .map_err(|_| ReadingError::InvalidFormat(text.to_string()))?;
        let minutes = caps[2]
            .parse()
            .map_err(|_| ReadingError::InvalidFormat(text.to_string()))?;

        Ok(Self { hours, minutes })
    }

    /// Hour of day, 0-23
    pub fn hours(&self) -> u8 {
        self.hours
    }

    /// Minute of the hour, 0-59
    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Minutes since midnight
    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hours) * 60 + u32::from(self.minutes)
    }

    /// Build a wall clock from minutes since midnight, wrapping at a full day
    pub fn from_minutes_since_midnight(total: u32) -> Self {
        let total = total % MINUTES_PER_DAY;
        Self {
            hours: (total / 60) as u8,
            minutes: (total % 60) as u8,
        }
    }

    /// Minutes elapsed from `origin` to `self`, assuming at most one midnight crossing
    pub fn minutes_since(&self, origin: WallClock) -> u32 {
        let this = self.minutes_since_midnight();
        let start = origin.minutes_since_midnight();
        if this >= start {
            this - start
        } else {
            this + MINUTES_PER_DAY - start
        }
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for WallClock {
    type Err = ReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WallClock {
    type Error = ReadingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WallClock> for String {
    fn from(value: WallClock) -> Self {
        value.to_string()
    }
}

/// Elapsed minutes of a new reading relative to the session origin
///
/// Returns 0 when `prior` is empty: the reading becomes the origin.
pub fn normalize(wall_clock: &str, prior: &[Measurement]) -> Result<u32, ReadingError> {
    let clock = WallClock::parse(wall_clock)?;
    Ok(elapsed_from_origin(clock, prior))
}

/// Same as [`normalize`] for an already parsed wall clock
pub fn elapsed_from_origin(clock: WallClock, prior: &[Measurement]) -> u32 {
    match prior.first() {
        Some(origin) => clock.minutes_since(origin.wall_clock()),
        None => 0,
    }
}
