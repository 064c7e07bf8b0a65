//! Measurements and projected points

use serde::{Deserialize, Serialize};

use crate::error::ReadingError;
use crate::time::WallClock;

/// A single logged CO2 reading
///
/// Fields are read-only once constructed; the session only ever appends or clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    wall_clock: WallClock,
    elapsed_minutes: u32,
    concentration_ppm: u32,
}

impl Measurement {
    /// Create a measurement from already validated parts
    pub fn new(wall_clock: WallClock, elapsed_minutes: u32, concentration_ppm: u32) -> Self {
        Self {
            wall_clock,
            elapsed_minutes,
            concentration_ppm,
        }
    }

    /// Time of day as entered
    pub fn wall_clock(&self) -> WallClock {
        self.wall_clock
    }

    /// Minutes since the first measurement of the session
    pub fn elapsed_minutes(&self) -> u32 {
        self.elapsed_minutes
    }

    /// CO2 concentration in ppm
    pub fn concentration_ppm(&self) -> u32 {
        self.concentration_ppm
    }
}

/// A point on the projected segment toward the target concentration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// Minutes since the first measurement
    pub elapsed_minutes: f64,
    /// Projected concentration in ppm
    pub concentration_ppm: f64,
}

impl ProjectedPoint {
    /// Create a projected point
    pub fn new(elapsed_minutes: f64, concentration_ppm: f64) -> Self {
        Self {
            elapsed_minutes,
            concentration_ppm,
        }
    }
}

impl From<&Measurement> for ProjectedPoint {
    fn from(m: &Measurement) -> Self {
        Self::new(f64::from(m.elapsed_minutes), f64::from(m.concentration_ppm))
    }
}

/// Parse a concentration entry as a positive whole number of ppm
pub fn parse_concentration(text: &str) -> Result<u32, ReadingError> {
    match text.trim().parse::<u32>() {
        Ok(ppm) if ppm > 0 => Ok(ppm),
        _ => Err(ReadingError::InvalidNumber(text.to_string())),
    }
}
